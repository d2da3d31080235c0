use crate::types::{PresaleError, Round, SaleRules};

// ============================================================================
// CLASSIFICAÇÃO DE RODADAS
// ============================================================================

/// Classifica `now` numa rodada. Intervalos semiabertos:
///
/// - `[.., start)` NotStarted
/// - `[start, end - round2)` Round1
/// - `[end - round2, end - fcfs)` Round2
/// - `[end - fcfs, end)` Fcfs
/// - `[end, ..)` Closed
///
/// O FCFS tem precedência sobre a Round2 quando as duas janelas se sobrepõem.
pub fn round_at(now: u64, sale_start: u64, sale_end: u64, rules: &SaleRules) -> Round {
    if now < sale_start {
        return Round::NotStarted;
    }
    if now >= sale_end {
        return Round::Closed;
    }
    if now >= sale_end.saturating_sub(rules.fcfs_duration) {
        return Round::Fcfs;
    }
    if now >= sale_end.saturating_sub(rules.round2_duration) {
        return Round::Round2;
    }
    Round::Round1
}

/// Multiplicador do limite por endereço. `None` fora da venda.
pub fn multiplier(round: Round, rules: &SaleRules) -> Option<u32> {
    match round {
        Round::Round1 => Some(1),
        Round::Round2 => Some(rules.round2_multiplier),
        Round::Fcfs => Some(rules.fcfs_multiplier),
        Round::NotStarted | Round::Closed => None,
    }
}

/// A Round1 sempre exige whitelist; as demais seguem as flags atuais.
pub fn requires_whitelist(round: Round, rules: &SaleRules) -> bool {
    match round {
        Round::Round1 => true,
        Round::Round2 => rules.round2_requires_whitelist,
        Round::Fcfs => rules.fcfs_requires_whitelist,
        Round::NotStarted | Round::Closed => false,
    }
}

/// Limite normalizado que um endereço pode gastar na rodada.
pub fn round_allowance(
    per_address_allowance: i128,
    round: Round,
    rules: &SaleRules,
) -> Result<i128, PresaleError> {
    let factor = match multiplier(round, rules) {
        Some(m) => m,
        None if round == Round::NotStarted => return Err(PresaleError::SaleNotStarted),
        None => return Err(PresaleError::SaleEnded),
    };
    per_address_allowance
        .checked_mul(factor as i128)
        .ok_or(PresaleError::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;

    const START: u64 = 1_643_713_200;
    const END: u64 = START + 6 * 3600;

    fn rules() -> SaleRules {
        SaleRules {
            round2_multiplier: 2,
            fcfs_multiplier: 10,
            round2_duration: 3600,
            fcfs_duration: 1200,
            round2_requires_whitelist: true,
            fcfs_requires_whitelist: false,
        }
    }

    #[test]
    fn test_exact_boundaries() {
        let r = rules();
        assert_eq!(round_at(START - 1, START, END, &r), Round::NotStarted);
        assert_eq!(round_at(START, START, END, &r), Round::Round1);
        assert_eq!(round_at(END - 3601, START, END, &r), Round::Round1);
        assert_eq!(round_at(END - 3600, START, END, &r), Round::Round2);
        assert_eq!(round_at(END - 1201, START, END, &r), Round::Round2);
        assert_eq!(round_at(END - 1200, START, END, &r), Round::Fcfs);
        assert_eq!(round_at(END - 1, START, END, &r), Round::Fcfs);
        assert_eq!(round_at(END, START, END, &r), Round::Closed);
        assert_eq!(round_at(u64::MAX, START, END, &r), Round::Closed);
    }

    #[test]
    fn test_fcfs_wins_when_windows_overlap() {
        let mut r = rules();
        r.round2_duration = 600;
        r.fcfs_duration = 1200;
        // Round2 nunca aparece: o FCFS já cobre a janela inteira dela
        assert_eq!(round_at(END - 1199, START, END, &r), Round::Fcfs);
        assert_eq!(round_at(END - 300, START, END, &r), Round::Fcfs);
        assert_eq!(round_at(END - 1201, START, END, &r), Round::Round1);
    }

    #[test]
    fn test_zero_durations_leave_only_round1() {
        let mut r = rules();
        r.round2_duration = 0;
        r.fcfs_duration = 0;
        assert_eq!(round_at(END - 1, START, END, &r), Round::Round1);
        assert_eq!(round_at(END, START, END, &r), Round::Closed);
    }

    #[test]
    fn test_whitelist_requirement() {
        let mut r = rules();
        assert!(requires_whitelist(Round::Round1, &r));
        assert!(requires_whitelist(Round::Round2, &r));
        assert!(!requires_whitelist(Round::Fcfs, &r));

        r.round2_requires_whitelist = false;
        r.fcfs_requires_whitelist = true;
        assert!(!requires_whitelist(Round::Round2, &r));
        assert!(requires_whitelist(Round::Fcfs, &r));
        // Round1 ignora as flags
        assert!(requires_whitelist(Round::Round1, &r));
    }

    #[test]
    fn test_round_allowance_scales_by_multiplier() {
        let r = rules();
        assert_eq!(round_allowance(500, Round::Round1, &r), Ok(500));
        assert_eq!(round_allowance(500, Round::Round2, &r), Ok(1000));
        assert_eq!(round_allowance(500, Round::Fcfs, &r), Ok(5000));
        assert_eq!(
            round_allowance(500, Round::NotStarted, &r),
            Err(PresaleError::SaleNotStarted)
        );
        assert_eq!(
            round_allowance(500, Round::Closed, &r),
            Err(PresaleError::SaleEnded)
        );
        assert_eq!(
            round_allowance(i128::MAX, Round::Fcfs, &r),
            Err(PresaleError::ArithmeticOverflow)
        );
    }
}
