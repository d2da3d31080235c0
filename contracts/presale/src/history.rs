use soroban_sdk::{Env, Vec};
use crate::storage;
use crate::types::{BuyHistoryEntry, PresaleError};

// ============================================================================
// HISTÓRICO DE COMPRAS (append-only)
// ============================================================================

/// Máximo de entradas devolvidas por página.
pub const MAX_PAGE: u32 = 100;

/// Grava a entrada no fim do log e devolve o índice dela.
pub fn append(env: &Env, entry: &BuyHistoryEntry) -> Result<u32, PresaleError> {
    let index = storage::get_history_len(env);
    let next = index
        .checked_add(1)
        .ok_or(PresaleError::ArithmeticOverflow)?;
    storage::set_history_entry(env, index, entry);
    storage::set_history_len(env, next);
    Ok(index)
}

pub fn len(env: &Env) -> u32 {
    storage::get_history_len(env)
}

/// Entradas `[start, start + limit)`, com `limit` limitado a `MAX_PAGE`.
pub fn page(env: &Env, start: u32, limit: u32) -> Vec<BuyHistoryEntry> {
    let end = start
        .saturating_add(limit.min(MAX_PAGE))
        .min(len(env));
    let mut entries = Vec::new(env);
    for index in start..end {
        if let Some(entry) = storage::get_history_entry(env, index) {
            entries.push_back(entry);
        }
    }
    entries
}
