use soroban_sdk::{Address, Env, Vec};
use crate::events;
use crate::storage;
use crate::types::PresaleError;

// ============================================================================
// WHITELIST
// ============================================================================

/// Tamanho máximo de um lote de add/remove.
pub const MAX_BATCH: u32 = 200;

pub fn is_whitelisted(env: &Env, addr: &Address) -> bool {
    storage::is_whitelisted(env, addr)
}

/// Adiciona ou remove um endereço. Idempotente.
pub fn set(env: &Env, addr: &Address, whitelisted: bool) {
    storage::set_whitelisted(env, addr, whitelisted);
    events::emit_whitelist(env, addr, whitelisted);
}

/// Aplica o lote inteiro ou nada: o tamanho é validado antes de qualquer
/// escrita, e a autorização já foi checada pelo chamador.
pub fn set_batch(env: &Env, addrs: &Vec<Address>, whitelisted: bool) -> Result<u32, PresaleError> {
    if addrs.len() > MAX_BATCH {
        return Err(PresaleError::TooManyEntries);
    }
    for addr in addrs.iter() {
        set(env, &addr, whitelisted);
    }
    Ok(addrs.len())
}
