use soroban_sdk::{token, Address, Env};
use crate::types::PresaleError;

// ============================================================================
// TRANSFERÊNCIAS DE VALOR
// ============================================================================

// Toda falha do token vira `TransferFailed`. O erro devolvido pela entrada do
// contrato desfaz qualquer escrita já feita na mesma invocação.

fn transfer(
    env: &Env,
    token: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), PresaleError> {
    let client = token::Client::new(env, token);
    match client.try_transfer(from, to, &amount) {
        Ok(Ok(())) => Ok(()),
        _ => Err(PresaleError::TransferFailed),
    }
}

/// Puxa `amount` de `from` para o contrato.
pub fn transfer_in(
    env: &Env,
    token: &Address,
    from: &Address,
    amount: i128,
) -> Result<(), PresaleError> {
    transfer(env, token, from, &env.current_contract_address(), amount)
}

/// Envia `amount` do contrato para `to`.
pub fn transfer_out(
    env: &Env,
    token: &Address,
    to: &Address,
    amount: i128,
) -> Result<(), PresaleError> {
    transfer(env, token, &env.current_contract_address(), to, amount)
}

/// Saldo do contrato em `token`.
pub fn balance_of(env: &Env, token: &Address) -> i128 {
    token::Client::new(env, token).balance(&env.current_contract_address())
}

/// Decimais informados pelo próprio token.
pub fn decimals_of(env: &Env, token: &Address) -> Result<u32, PresaleError> {
    match token::Client::new(env, token).try_decimals() {
        Ok(Ok(decimals)) => Ok(decimals),
        _ => Err(PresaleError::UnsupportedToken),
    }
}
