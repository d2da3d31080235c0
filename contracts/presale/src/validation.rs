use soroban_sdk::{Address, Env, Vec};
use crate::storage;
use crate::types::{PaymentToken, PresaleError, Round, SaleParams, SaleRules};

// ============================================================================
// VALIDAÇÕES DE ACESSO E ESTADO
// ============================================================================

/// Guard único de todas as operações administrativas: exige a assinatura do
/// caller e que ele seja o admin gravado.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), PresaleError> {
    caller.require_auth();
    let admin = storage::get_admin(env)?;
    if caller != &admin {
        return Err(PresaleError::Unauthorized);
    }
    Ok(())
}

/// Valida se a venda não está pausada
pub fn require_not_paused(env: &Env) -> Result<(), PresaleError> {
    if storage::is_paused(env) {
        return Err(PresaleError::Paused);
    }
    Ok(())
}

/// Valida se a rodada aceita compras
pub fn require_open_round(round: Round) -> Result<(), PresaleError> {
    match round {
        Round::NotStarted => Err(PresaleError::SaleNotStarted),
        Round::Closed => Err(PresaleError::SaleEnded),
        Round::Round1 | Round::Round2 | Round::Fcfs => Ok(()),
    }
}

/// Valida se o amount é válido (> 0)
pub fn require_positive_amount(amount: i128) -> Result<(), PresaleError> {
    if amount <= 0 {
        return Err(PresaleError::InvalidAmount);
    }
    Ok(())
}

/// Retorna o token de pagamento aceito correspondente a `token`.
pub fn require_accepted_token(env: &Env, token: &Address) -> Result<PaymentToken, PresaleError> {
    storage::get_payment_tokens(env)
        .iter()
        .find(|p| &p.token == token)
        .ok_or(PresaleError::UnsupportedToken)
}

/// Token da venda e tokens de pagamento só saem pelos caminhos próprios.
pub fn require_unprotected_token(env: &Env, token: &Address) -> Result<(), PresaleError> {
    let config = storage::get_config(env)?;
    if token == &config.sale_token || require_accepted_token(env, token).is_ok() {
        return Err(PresaleError::ProtectedToken);
    }
    Ok(())
}

// ============================================================================
// VALIDAÇÕES DE CONFIGURAÇÃO
// ============================================================================

/// Limite de tokens de pagamento aceitos.
pub const MAX_PAYMENT_TOKENS: u32 = 16;

pub fn require_valid_params(params: &SaleParams) -> Result<(), PresaleError> {
    if params.sale_start >= params.sale_end {
        return Err(PresaleError::InvalidSaleWindow);
    }
    if params.base_price <= 0 {
        return Err(PresaleError::InvalidPrice);
    }
    if params.per_address_allowance <= 0 {
        return Err(PresaleError::InvalidAllowance);
    }
    require_positive_amount(params.sale_token_amount)?;
    Ok(())
}

/// Multiplicadores >= 1 e as duas sub-janelas finais cabem na venda.
pub fn require_valid_rules(
    rules: &SaleRules,
    sale_start: u64,
    sale_end: u64,
) -> Result<(), PresaleError> {
    if rules.round2_multiplier == 0 || rules.fcfs_multiplier == 0 {
        return Err(PresaleError::InvalidMultiplier);
    }
    let window = sale_end.saturating_sub(sale_start);
    let tail = rules
        .round2_duration
        .checked_add(rules.fcfs_duration)
        .ok_or(PresaleError::InvalidRoundDurations)?;
    if tail > window {
        return Err(PresaleError::InvalidRoundDurations);
    }
    Ok(())
}

pub fn require_valid_payment_tokens(
    sale_token: &Address,
    tokens: &Vec<Address>,
) -> Result<(), PresaleError> {
    if tokens.is_empty() {
        return Err(PresaleError::NoPaymentTokens);
    }
    if tokens.len() > MAX_PAYMENT_TOKENS {
        return Err(PresaleError::TooManyEntries);
    }
    for (i, token) in tokens.iter().enumerate() {
        if &token == sale_token {
            return Err(PresaleError::ProtectedToken);
        }
        if tokens.iter().skip(i + 1).any(|other| other == token) {
            return Err(PresaleError::DuplicatePaymentToken);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use soroban_sdk::{testutils::Address as _, vec};

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
    fn test_params_validation() {
        let ok = SaleParams {
            sale_start: 100,
            sale_end: 200,
            base_price: 1,
            per_address_allowance: 1,
            sale_token_amount: 1,
        };
        assert_eq!(require_valid_params(&ok), Ok(()));
        assert_eq!(
            require_valid_params(&SaleParams { sale_end: 100, ..ok.clone() }),
            Err(PresaleError::InvalidSaleWindow)
        );
        assert_eq!(
            require_valid_params(&SaleParams { base_price: 0, ..ok.clone() }),
            Err(PresaleError::InvalidPrice)
        );
        assert_eq!(
            require_valid_params(&SaleParams { per_address_allowance: 0, ..ok.clone() }),
            Err(PresaleError::InvalidAllowance)
        );
        assert_eq!(
            require_valid_params(&SaleParams { sale_token_amount: 0, ..ok }),
            Err(PresaleError::InvalidAmount)
        );
    }

    #[test]
    fn test_rules_validation() {
        assert_eq!(require_valid_rules(&rules(), 0, 4800), Ok(()));
        assert_eq!(
            require_valid_rules(&rules(), 0, 4799),
            Err(PresaleError::InvalidRoundDurations)
        );
        assert_eq!(
            require_valid_rules(&SaleRules { fcfs_multiplier: 0, ..rules() }, 0, 4800),
            Err(PresaleError::InvalidMultiplier)
        );
        assert_eq!(
            require_valid_rules(&SaleRules { round2_duration: u64::MAX, ..rules() }, 0, 4800),
            Err(PresaleError::InvalidRoundDurations)
        );
    }

    #[test]
    fn test_payment_token_list_validation() {
        let env = Env::default();
        let sale = Address::generate(&env);
        let a = Address::generate(&env);
        let b = Address::generate(&env);

        assert_eq!(require_valid_payment_tokens(&sale, &vec![&env, a.clone(), b.clone()]), Ok(()));
        assert_eq!(
            require_valid_payment_tokens(&sale, &Vec::new(&env)),
            Err(PresaleError::NoPaymentTokens)
        );
        assert_eq!(
            require_valid_payment_tokens(&sale, &vec![&env, a.clone(), b, a.clone()]),
            Err(PresaleError::DuplicatePaymentToken)
        );
        assert_eq!(
            require_valid_payment_tokens(&sale, &vec![&env, a, sale.clone()]),
            Err(PresaleError::ProtectedToken)
        );
    }

    #[test]
    fn test_open_round() {
        assert_eq!(require_open_round(Round::NotStarted), Err(PresaleError::SaleNotStarted));
        assert_eq!(require_open_round(Round::Closed), Err(PresaleError::SaleEnded));
        assert_eq!(require_open_round(Round::Fcfs), Ok(()));
    }
}
