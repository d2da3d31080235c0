use soroban_sdk::{symbol_short, Address, Env, Vec};
use crate::types::{
    BuyHistoryEntry, PaymentToken, PresaleError, PurchaseRecord, SaleConfig, SaleRules,
    VestingTranche,
};

// ============================================================================
// CONSTANTES
// ============================================================================

/// TTL para storage crítico (1 ano em ledgers ~= 6.3M ledgers)
const CRITICAL_STORAGE_TTL: u32 = 6_307_200;

/// TTL threshold para bump (30 dias ~= 518K ledgers)
const CRITICAL_STORAGE_THRESHOLD: u32 = 518_400;

// ============================================================================
// FUNÇÕES DE BUMP (TTL)
// ============================================================================

/// Faz bump do TTL do storage de instância (config, regras, agregados)
pub fn bump_critical_storage(env: &Env) {
    env.storage().instance().extend_ttl(
        CRITICAL_STORAGE_THRESHOLD,
        CRITICAL_STORAGE_TTL,
    );
}

fn bump_purchase(env: &Env, buyer: &Address) {
    let key = (symbol_short!("purchase"), buyer);
    env.storage().persistent().extend_ttl(
        &key,
        CRITICAL_STORAGE_THRESHOLD,
        CRITICAL_STORAGE_TTL,
    );
}

fn bump_whitelist(env: &Env, addr: &Address) {
    let key = (symbol_short!("wl"), addr);
    env.storage().persistent().extend_ttl(
        &key,
        CRITICAL_STORAGE_THRESHOLD,
        CRITICAL_STORAGE_TTL,
    );
}

fn bump_history(env: &Env, index: u32) {
    let key = (symbol_short!("history"), index);
    env.storage().persistent().extend_ttl(
        &key,
        CRITICAL_STORAGE_THRESHOLD,
        CRITICAL_STORAGE_TTL,
    );
}

// ============================================================================
// ADMIN
// ============================================================================

pub fn has_admin(env: &Env) -> bool {
    env.storage().instance().has(&symbol_short!("admin"))
}

pub fn get_admin(env: &Env) -> Result<Address, PresaleError> {
    env.storage()
        .instance()
        .get(&symbol_short!("admin"))
        .ok_or(PresaleError::NotInitialized)
}

pub fn set_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&symbol_short!("admin"), admin);
}

// ============================================================================
// PAUSED
// ============================================================================

pub fn is_paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&symbol_short!("paused"))
        .unwrap_or(false)
}

pub fn set_paused(env: &Env, paused: bool) {
    env.storage().instance().set(&symbol_short!("paused"), &paused);
}

// ============================================================================
// REENTRANCY GUARD
// ============================================================================

pub fn is_reentrancy_locked(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&symbol_short!("lock"))
        .unwrap_or(false)
}

pub fn set_reentrancy_guard(env: &Env, locked: bool) {
    env.storage().instance().set(&symbol_short!("lock"), &locked);
}

// ============================================================================
// CONFIGURAÇÃO E REGRAS
// ============================================================================

pub fn get_config(env: &Env) -> Result<SaleConfig, PresaleError> {
    env.storage()
        .instance()
        .get(&symbol_short!("config"))
        .ok_or(PresaleError::NotInitialized)
}

pub fn set_config(env: &Env, config: &SaleConfig) {
    env.storage().instance().set(&symbol_short!("config"), config);
}

pub fn get_rules(env: &Env) -> Result<SaleRules, PresaleError> {
    env.storage()
        .instance()
        .get(&symbol_short!("rules"))
        .ok_or(PresaleError::NotInitialized)
}

pub fn set_rules(env: &Env, rules: &SaleRules) {
    env.storage().instance().set(&symbol_short!("rules"), rules);
}

pub fn get_payment_tokens(env: &Env) -> Vec<PaymentToken> {
    env.storage()
        .instance()
        .get(&symbol_short!("pay_tkns"))
        .unwrap_or(Vec::new(env))
}

pub fn set_payment_tokens(env: &Env, tokens: &Vec<PaymentToken>) {
    env.storage().instance().set(&symbol_short!("pay_tkns"), tokens);
}

pub fn get_tranches(env: &Env) -> Result<Vec<VestingTranche>, PresaleError> {
    env.storage()
        .instance()
        .get(&symbol_short!("tranches"))
        .ok_or(PresaleError::NotInitialized)
}

pub fn set_tranches(env: &Env, tranches: &Vec<VestingTranche>) {
    env.storage().instance().set(&symbol_short!("tranches"), tranches);
}

// ============================================================================
// AGREGADOS DA VENDA
// ============================================================================

pub fn get_sold(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&symbol_short!("sold"))
        .unwrap_or(0)
}

pub fn set_sold(env: &Env, amount: i128) {
    env.storage().instance().set(&symbol_short!("sold"), &amount);
}

pub fn get_total_claimed(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&symbol_short!("tot_claim"))
        .unwrap_or(0)
}

pub fn set_total_claimed(env: &Env, amount: i128) {
    env.storage().instance().set(&symbol_short!("tot_claim"), &amount);
}

pub fn is_deposited(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&symbol_short!("deposited"))
        .unwrap_or(false)
}

pub fn set_deposited(env: &Env) {
    env.storage().instance().set(&symbol_short!("deposited"), &true);
}

// ============================================================================
// WHITELIST
// ============================================================================

pub fn is_whitelisted(env: &Env, addr: &Address) -> bool {
    let key = (symbol_short!("wl"), addr);
    env.storage()
        .persistent()
        .get(&key)
        .unwrap_or(false)
}

pub fn set_whitelisted(env: &Env, addr: &Address, whitelisted: bool) {
    let key = (symbol_short!("wl"), addr);
    if whitelisted {
        env.storage().persistent().set(&key, &true);
        bump_whitelist(env, addr);
    } else {
        env.storage().persistent().remove(&key);
    }
}

// ============================================================================
// REGISTRO DE COMPRAS
// ============================================================================

pub fn get_purchase(env: &Env, buyer: &Address) -> Option<PurchaseRecord> {
    let key = (symbol_short!("purchase"), buyer);
    env.storage().persistent().get(&key)
}

pub fn set_purchase(env: &Env, buyer: &Address, record: &PurchaseRecord) {
    let key = (symbol_short!("purchase"), buyer);
    env.storage().persistent().set(&key, record);
    bump_purchase(env, buyer);
}

// ============================================================================
// HISTÓRICO
// ============================================================================

pub fn get_history_len(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&symbol_short!("hist_len"))
        .unwrap_or(0)
}

pub fn set_history_len(env: &Env, len: u32) {
    env.storage().instance().set(&symbol_short!("hist_len"), &len);
}

pub fn get_history_entry(env: &Env, index: u32) -> Option<BuyHistoryEntry> {
    let key = (symbol_short!("history"), index);
    env.storage().persistent().get(&key)
}

pub fn set_history_entry(env: &Env, index: u32, entry: &BuyHistoryEntry) {
    let key = (symbol_short!("history"), index);
    env.storage().persistent().set(&key, entry);
    bump_history(env, index);
}
