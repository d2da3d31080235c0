use crate::types::PresaleError;

// ============================================================================
// PONTO FIXO
// ============================================================================

/// Base comum para comparar valores pagos em tokens com decimais diferentes.
pub const NORMALIZED_DECIMALS: u32 = 18;

fn pow10(exp: u32) -> Result<i128, PresaleError> {
    10i128
        .checked_pow(exp)
        .ok_or(PresaleError::ArithmeticOverflow)
}

/// Converte `amount` (unidades mínimas de um token com `decimals`) para 18
/// decimais. Acima de 18 decimais a conversão trunca.
pub fn normalize(amount: i128, decimals: u32) -> Result<i128, PresaleError> {
    if decimals <= NORMALIZED_DECIMALS {
        amount
            .checked_mul(pow10(NORMALIZED_DECIMALS - decimals)?)
            .ok_or(PresaleError::ArithmeticOverflow)
    } else {
        Ok(amount / pow10(decimals - NORMALIZED_DECIMALS)?)
    }
}

/// Unidades mínimas do token da venda compradas com `normalized`.
/// Divisão com piso, nunca vende a mais. Quociente e resto são escalados
/// separadamente, então `normalized * 10^decimals` nunca é formado.
pub fn token_amount(
    normalized: i128,
    sale_token_decimals: u32,
    base_price: i128,
) -> Result<i128, PresaleError> {
    if base_price <= 0 {
        return Err(PresaleError::InvalidPrice);
    }
    let scale = pow10(sale_token_decimals)?;
    let whole = (normalized / base_price)
        .checked_mul(scale)
        .ok_or(PresaleError::ArithmeticOverflow)?;
    let fraction = (normalized % base_price)
        .checked_mul(scale)
        .ok_or(PresaleError::ArithmeticOverflow)?
        / base_price;
    whole
        .checked_add(fraction)
        .ok_or(PresaleError::ArithmeticOverflow)
}
