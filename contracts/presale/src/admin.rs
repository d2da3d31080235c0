use soroban_sdk::{Address, Env, Vec};
use crate::events;
use crate::payments;
use crate::storage;
use crate::types::PresaleError;
use crate::validation;

// ============================================================================
// ADMIN OPS - DEPÓSITO, SAQUE E RECUPERAÇÃO
// ============================================================================

/// Puxa a oferta anunciada (`sale_token_amount`) do admin para o contrato.
/// Só pode acontecer uma vez.
pub fn deposit_sale_tokens(env: &Env, from: &Address) -> Result<i128, PresaleError> {
    if storage::is_deposited(env) {
        return Err(PresaleError::AlreadyDeposited);
    }
    let config = storage::get_config(env)?;

    storage::set_deposited(env);
    payments::transfer_in(env, &config.sale_token, from, config.sale_token_amount)?;

    events::emit_deposit(env, from, config.sale_token_amount);
    Ok(config.sale_token_amount)
}

/// Tokens da venda que ainda pertencem aos compradores: vendidos e não
/// sacados.
pub fn reserved_for_claims(env: &Env) -> Result<i128, PresaleError> {
    storage::get_sold(env)
        .checked_sub(storage::get_total_claimed(env))
        .ok_or(PresaleError::ArithmeticOverflow)
}

/// Envia a `destination` a sobra não vendida do token da venda e o saldo
/// inteiro de cada token em `other_tokens`. O que está reservado para claims
/// fica no contrato. Devolve a sobra enviada.
///
/// `other_tokens` deve listar os tokens de pagamento arrecadados, sem
/// repetição. Um token repetido só é enviado uma vez (na segunda passada o
/// saldo já é zero); o token da venda na lista é recusado.
pub fn withdraw_all(
    env: &Env,
    destination: &Address,
    other_tokens: &Vec<Address>,
) -> Result<i128, PresaleError> {
    let config = storage::get_config(env)?;

    // Nada sai antes de a lista inteira ser validada
    for token in other_tokens.iter() {
        if token == config.sale_token {
            return Err(PresaleError::ProtectedToken);
        }
    }

    let balance = payments::balance_of(env, &config.sale_token);
    let unsold = balance
        .checked_sub(reserved_for_claims(env)?)
        .ok_or(PresaleError::ArithmeticOverflow)?
        .max(0);

    if unsold > 0 {
        payments::transfer_out(env, &config.sale_token, destination, unsold)?;
        events::emit_withdraw(env, &config.sale_token, destination, unsold);
    }

    for token in other_tokens.iter() {
        let amount = payments::balance_of(env, &token);
        if amount > 0 {
            payments::transfer_out(env, &token, destination, amount)?;
            events::emit_withdraw(env, &token, destination, amount);
        }
    }

    Ok(unsold)
}

/// Recupera um token sem relação com a venda enviado por engano.
pub fn give_back_token(
    env: &Env,
    destination: &Address,
    token_address: &Address,
) -> Result<i128, PresaleError> {
    validation::require_unprotected_token(env, token_address)?;

    let amount = payments::balance_of(env, token_address);
    if amount > 0 {
        payments::transfer_out(env, token_address, destination, amount)?;
        events::emit_give_back(env, token_address, destination, amount);
    }
    Ok(amount)
}
