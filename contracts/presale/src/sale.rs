use soroban_sdk::{Address, Env};
use crate::history;
use crate::payments;
use crate::pricing;
use crate::rounds;
use crate::storage;
use crate::types::{BuyHistoryEntry, PresaleError, PurchaseReceipt, Round};
use crate::validation;
use crate::vesting;
use crate::whitelist;

// ============================================================================
// MOTOR DA VENDA
// ============================================================================

/// Rodada vigente em `now` segundo a configuração e as regras atuais.
pub fn current_round(env: &Env, now: u64) -> Result<Round, PresaleError> {
    let config = storage::get_config(env)?;
    let rules = storage::get_rules(env)?;
    Ok(rounds::round_at(now, config.sale_start, config.sale_end, &rules))
}

/// Executa uma compra. As checagens seguem uma ordem fixa e cada uma falha
/// com o seu próprio erro:
///
/// 1. venda não pausada
/// 2. rodada aberta
/// 3. whitelist, se a rodada exigir
/// 4. token de pagamento aceito
/// 5. limite da rodada por endereço
/// 6. oferta restante
///
/// Só depois disso o registro, o agregado e o histórico são gravados e o
/// pagamento é puxado do comprador.
pub fn execute_purchase(
    env: &Env,
    buyer: &Address,
    payment_token: &Address,
    payment_amount: i128,
    now: u64,
) -> Result<PurchaseReceipt, PresaleError> {
    // === CHECKS ===
    let config = storage::get_config(env)?;
    let rules = storage::get_rules(env)?;

    validation::require_not_paused(env)?;

    let round = rounds::round_at(now, config.sale_start, config.sale_end, &rules);
    validation::require_open_round(round)?;

    if rounds::requires_whitelist(round, &rules) && !whitelist::is_whitelisted(env, buyer) {
        return Err(PresaleError::NotWhitelisted);
    }

    let payment = validation::require_accepted_token(env, payment_token)?;
    validation::require_positive_amount(payment_amount)?;
    let normalized = pricing::normalize(payment_amount, payment.decimals)?;

    let mut record = storage::get_purchase(env, buyer).unwrap_or_default();
    let allowance = rounds::round_allowance(config.per_address_allowance, round, &rules)?;
    let spent = record
        .spent_in(round)
        .checked_add(normalized)
        .ok_or(PresaleError::ArithmeticOverflow)?;
    if spent > allowance {
        return Err(PresaleError::LimitExceeded);
    }

    let tokens = pricing::token_amount(normalized, config.sale_token_decimals, config.base_price)?;
    if tokens == 0 {
        return Err(PresaleError::InvalidAmount);
    }
    let sold = storage::get_sold(env)
        .checked_add(tokens)
        .ok_or(PresaleError::ArithmeticOverflow)?;
    if sold > config.sale_token_amount {
        return Err(PresaleError::SoldOut);
    }

    // === EFFECTS ===
    record.credit_purchase(round, normalized, tokens)?;
    storage::set_purchase(env, buyer, &record);
    storage::set_sold(env, sold);
    history::append(
        env,
        &BuyHistoryEntry {
            buyer: buyer.clone(),
            timestamp: now,
            payment_token: payment_token.clone(),
            payment_amount,
        },
    )?;

    // === INTERACTIONS ===
    payments::transfer_in(env, payment_token, buyer, payment_amount)?;

    Ok(PurchaseReceipt {
        buyer: buyer.clone(),
        round,
        payment_token: payment_token.clone(),
        payment_amount,
        normalized_value: normalized,
        token_amount: tokens,
    })
}

/// Libera ao comprador tudo o que já venceu e ainda não foi sacado.
/// O registro avança exatamente pelo delta transferido.
pub fn execute_claim(env: &Env, buyer: &Address, now: u64) -> Result<i128, PresaleError> {
    // === CHECKS ===
    let config = storage::get_config(env)?;
    if now < config.sale_end {
        return Err(PresaleError::PresaleNotFinished);
    }

    let mut record = storage::get_purchase(env, buyer)
        .filter(|r| r.purchased > 0)
        .ok_or(PresaleError::NoClaimAmount)?;

    let tranches = storage::get_tranches(env)?;
    let releasable = vesting::releasable_amount(&tranches, &record, now)?;
    if releasable <= 0 {
        return Err(PresaleError::NothingToClaim);
    }

    // === EFFECTS ===
    record.credit_claim(releasable)?;
    storage::set_purchase(env, buyer, &record);
    let total_claimed = storage::get_total_claimed(env)
        .checked_add(releasable)
        .ok_or(PresaleError::ArithmeticOverflow)?;
    storage::set_total_claimed(env, total_claimed);

    // === INTERACTIONS ===
    payments::transfer_out(env, &config.sale_token, buyer, releasable)?;

    Ok(releasable)
}

/// Valor normalizado que `buyer` ainda pode gastar na rodada de `now`.
/// Zero fora da venda.
pub fn remaining_allowance(env: &Env, buyer: &Address, now: u64) -> Result<i128, PresaleError> {
    let config = storage::get_config(env)?;
    let rules = storage::get_rules(env)?;
    let round = rounds::round_at(now, config.sale_start, config.sale_end, &rules);
    if !round.is_open() {
        return Ok(0);
    }
    let allowance = rounds::round_allowance(config.per_address_allowance, round, &rules)?;
    let spent = storage::get_purchase(env, buyer)
        .map(|r| r.spent_in(round))
        .unwrap_or(0);
    Ok(allowance.saturating_sub(spent).max(0))
}

/// Tokens vestidos de `buyer` em `now`.
pub fn vested_of(env: &Env, buyer: &Address, now: u64) -> Result<i128, PresaleError> {
    let purchased = storage::get_purchase(env, buyer)
        .map(|r| r.purchased)
        .unwrap_or(0);
    let tranches = storage::get_tranches(env)?;
    vesting::vested_amount(&tranches, purchased, now)
}

/// Tokens que `buyer` conseguiria sacar em `now`. Zero antes do fim da venda.
pub fn claimable_of(env: &Env, buyer: &Address, now: u64) -> Result<i128, PresaleError> {
    let config = storage::get_config(env)?;
    if now < config.sale_end {
        return Ok(0);
    }
    match storage::get_purchase(env, buyer) {
        Some(record) => {
            let tranches = storage::get_tranches(env)?;
            vesting::releasable_amount(&tranches, &record, now)
        }
        None => Ok(0),
    }
}
