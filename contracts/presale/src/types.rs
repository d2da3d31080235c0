use soroban_sdk::{contracterror, contracttype, Address};

// ============================================================================
// ERROS DO CONTRATO
// ============================================================================

/// Motivos de rejeição estáveis. Os discriminantes fazem parte da ABI do
/// contrato e não podem ser renumerados.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum PresaleError {
    AlreadyInitialized = 1,
    NotInitialized = 2,
    Unauthorized = 3,
    Paused = 4,

    // Janela de tempo
    SaleNotStarted = 5,
    SaleEnded = 6,
    PresaleNotFinished = 7,

    NotWhitelisted = 8,
    UnsupportedToken = 9,
    ProtectedToken = 10,
    LimitExceeded = 11,
    SoldOut = 12,

    // Claim: nunca comprou vs. nada novo liberado
    NoClaimAmount = 13,
    NothingToClaim = 14,

    TransferFailed = 15,
    InvalidAmount = 16,
    ArithmeticOverflow = 17,
    Reentrant = 18,

    // Configuração
    InvalidSaleWindow = 19,
    InvalidPrice = 20,
    InvalidAllowance = 21,
    InvalidMultiplier = 22,
    InvalidRoundDurations = 23,
    InvalidTranches = 24,
    NoPaymentTokens = 25,
    DuplicatePaymentToken = 26,
    TooManyEntries = 27,
    AlreadyDeposited = 28,
}

// ============================================================================
// RODADAS
// ============================================================================

/// Fase da venda derivada do relógio. Nunca é armazenada.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Round {
    NotStarted,
    Round1,
    Round2,
    Fcfs,
    Closed,
}

impl Round {
    pub fn is_open(&self) -> bool {
        matches!(self, Round::Round1 | Round::Round2 | Round::Fcfs)
    }
}

// ============================================================================
// CONFIGURAÇÃO
// ============================================================================

/// Parâmetros informados na inicialização.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleParams {
    pub sale_start: u64,
    pub sale_end: u64,
    /// Preço de uma unidade inteira do token da venda, em 18 decimais.
    pub base_price: i128,
    /// Gasto máximo por endereço na Round1, em 18 decimais.
    pub per_address_allowance: i128,
    /// Oferta anunciada, em unidades mínimas do token da venda.
    pub sale_token_amount: i128,
}

/// Configuração imutável gravada na inicialização.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleConfig {
    pub sale_token: Address,
    pub sale_token_decimals: u32,
    pub sale_start: u64,
    pub sale_end: u64,
    pub base_price: i128,
    pub per_address_allowance: i128,
    pub sale_token_amount: i128,
}

/// Regras das rodadas, alteráveis pelo admin a qualquer momento.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SaleRules {
    pub round2_multiplier: u32,
    pub fcfs_multiplier: u32,
    /// Segundos antes de `sale_end` em que a Round2 começa.
    pub round2_duration: u64,
    /// Segundos antes de `sale_end` em que o FCFS começa.
    pub fcfs_duration: u64,
    pub round2_requires_whitelist: bool,
    pub fcfs_requires_whitelist: bool,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentToken {
    pub token: Address,
    pub decimals: u32,
}

// ============================================================================
// VESTING
// ============================================================================

/// Uma parcela de liberação: `bps` do total comprado fica disponível a partir
/// de `unlock_time`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct VestingTranche {
    pub bps: u32,
    pub unlock_time: u64,
}

// ============================================================================
// REGISTRO DE COMPRAS
// ============================================================================

/// Registro cumulativo de um comprador. Criado na primeira compra.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct PurchaseRecord {
    pub round1_spent: i128,
    pub round2_spent: i128,
    pub fcfs_spent: i128,
    pub purchased: i128,
    pub claimed: i128,
}

impl PurchaseRecord {
    /// Valor normalizado já gasto na rodada.
    pub fn spent_in(&self, round: Round) -> i128 {
        match round {
            Round::Round1 => self.round1_spent,
            Round::Round2 => self.round2_spent,
            Round::Fcfs => self.fcfs_spent,
            Round::NotStarted | Round::Closed => 0,
        }
    }

    pub fn credit_purchase(
        &mut self,
        round: Round,
        normalized: i128,
        tokens: i128,
    ) -> Result<(), PresaleError> {
        let slot = match round {
            Round::Round1 => &mut self.round1_spent,
            Round::Round2 => &mut self.round2_spent,
            Round::Fcfs => &mut self.fcfs_spent,
            Round::NotStarted => return Err(PresaleError::SaleNotStarted),
            Round::Closed => return Err(PresaleError::SaleEnded),
        };
        *slot = slot
            .checked_add(normalized)
            .ok_or(PresaleError::ArithmeticOverflow)?;
        self.purchased = self
            .purchased
            .checked_add(tokens)
            .ok_or(PresaleError::ArithmeticOverflow)?;
        Ok(())
    }

    pub fn credit_claim(&mut self, amount: i128) -> Result<(), PresaleError> {
        let claimed = self
            .claimed
            .checked_add(amount)
            .ok_or(PresaleError::ArithmeticOverflow)?;
        if claimed > self.purchased {
            return Err(PresaleError::InvalidAmount);
        }
        self.claimed = claimed;
        Ok(())
    }
}

/// Retorno de `purchase`.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PurchaseReceipt {
    pub buyer: Address,
    pub round: Round,
    pub payment_token: Address,
    pub payment_amount: i128,
    pub normalized_value: i128,
    pub token_amount: i128,
}

/// Entrada imutável do histórico de compras.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BuyHistoryEntry {
    pub buyer: Address,
    pub timestamp: u64,
    pub payment_token: Address,
    pub payment_amount: i128,
}
