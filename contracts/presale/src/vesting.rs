use soroban_sdk::Vec;
use crate::types::{PresaleError, PurchaseRecord, VestingTranche};

// ============================================================================
// VESTING POR PARCELAS
// ============================================================================

/// 100% em basis points.
pub const BPS_DENOMINATOR: u32 = 10_000;

/// Limite de parcelas aceitas na inicialização.
pub const MAX_TRANCHES: u32 = 32;

/// Soma dos basis points das parcelas com `unlock_time <= now`.
/// As parcelas estão ordenadas, então a soma para na primeira bloqueada.
pub fn unlocked_bps(tranches: &Vec<VestingTranche>, now: u64) -> u32 {
    let mut bps: u32 = 0;
    for tranche in tranches.iter() {
        if tranche.unlock_time > now {
            break;
        }
        bps = bps.saturating_add(tranche.bps);
    }
    bps.min(BPS_DENOMINATOR)
}

/// Parte de `purchased` liberada em `now`. Aplica o piso uma única vez sobre
/// a soma, então com todas as parcelas abertas o resultado é exatamente
/// `purchased`.
pub fn vested_amount(
    tranches: &Vec<VestingTranche>,
    purchased: i128,
    now: u64,
) -> Result<i128, PresaleError> {
    let bps = unlocked_bps(tranches, now);
    if bps == BPS_DENOMINATOR {
        return Ok(purchased);
    }
    let numerator = purchased
        .checked_mul(bps as i128)
        .ok_or(PresaleError::ArithmeticOverflow)?;
    Ok(numerator / BPS_DENOMINATOR as i128)
}

/// Quanto o comprador ainda pode sacar em `now`.
pub fn releasable_amount(
    tranches: &Vec<VestingTranche>,
    record: &PurchaseRecord,
    now: u64,
) -> Result<i128, PresaleError> {
    let vested = vested_amount(tranches, record.purchased, now)?;
    Ok(vested.saturating_sub(record.claimed).max(0))
}

/// Valida a lista de parcelas: não vazia, ordenada, cada uma > 0 e soma 100%.
pub fn validate_tranches(tranches: &Vec<VestingTranche>) -> Result<(), PresaleError> {
    if tranches.is_empty() {
        return Err(PresaleError::InvalidTranches);
    }
    if tranches.len() > MAX_TRANCHES {
        return Err(PresaleError::TooManyEntries);
    }

    let mut total: u32 = 0;
    let mut last_unlock: u64 = 0;
    for tranche in tranches.iter() {
        if tranche.bps == 0 || tranche.unlock_time < last_unlock {
            return Err(PresaleError::InvalidTranches);
        }
        total = total
            .checked_add(tranche.bps)
            .ok_or(PresaleError::InvalidTranches)?;
        last_unlock = tranche.unlock_time;
    }

    if total != BPS_DENOMINATOR {
        return Err(PresaleError::InvalidTranches);
    }
    Ok(())
}
