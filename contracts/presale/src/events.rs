use soroban_sdk::{symbol_short, Address, Env};
use crate::types::{Round, SaleRules};

//
// EVENTOS DA VENDA
//

// Venda inicializada
pub fn emit_init(env: &Env, admin: &Address, sale_token: &Address, sale_start: u64, sale_end: u64) {
    env.events().publish(
        (symbol_short!("init"), admin),
        (sale_token.clone(), sale_start, sale_end),
    );
}

// Depósito da oferta
pub fn emit_deposit(env: &Env, from: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("deposit"), from),
        amount,
    );
}

// Compra concluída
pub fn emit_buy(
    env: &Env,
    buyer: &Address,
    round: Round,
    payment_token: &Address,
    payment_amount: i128,
    token_amount: i128,
) {
    env.events().publish(
        (symbol_short!("buy"), buyer),
        (round, payment_token.clone(), payment_amount, token_amount),
    );
}

// Claim de tokens liberados
pub fn emit_claim(env: &Env, buyer: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("claim"), buyer),
        amount,
    );
}

// Saque do admin (sobra da venda ou pagamentos)
pub fn emit_withdraw(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("withdraw"), token, to),
        amount,
    );
}

// Devolução de token enviado por engano
pub fn emit_give_back(env: &Env, token: &Address, to: &Address, amount: i128) {
    env.events().publish(
        (symbol_short!("giveback"), token, to),
        amount,
    );
}

// Pausa / despausa
pub fn emit_pause(env: &Env, paused: bool) {
    env.events().publish(
        (symbol_short!("pause"),),
        paused,
    );
}

// Whitelist
pub fn emit_whitelist(env: &Env, addr: &Address, whitelisted: bool) {
    let topic = if whitelisted {
        symbol_short!("wl_add")
    } else {
        symbol_short!("wl_del")
    };
    env.events().publish((topic, addr), whitelisted);
}

// Regras das rodadas alteradas
pub fn emit_rules(env: &Env, rules: &SaleRules) {
    env.events().publish(
        (symbol_short!("rules"),),
        rules.clone(),
    );
}

// Troca de admin
pub fn emit_admin_transfer(env: &Env, old_admin: &Address, new_admin: &Address) {
    env.events().publish(
        (symbol_short!("admin"), old_admin),
        new_admin.clone(),
    );
}

//
// TESTES
//
