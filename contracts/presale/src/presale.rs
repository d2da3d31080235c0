use soroban_sdk::{contract, contractimpl, Address, Env, Vec};
use crate::admin;
use crate::events;
use crate::history;
use crate::payments;
use crate::sale;
use crate::storage;
use crate::types::{
    BuyHistoryEntry, PaymentToken, PresaleError, PurchaseReceipt, PurchaseRecord, Round,
    SaleConfig, SaleParams, SaleRules, VestingTranche,
};
use crate::validation;
use crate::vesting;
use crate::whitelist;

//
// GUARDS
//

/// Executa `body` com o guard de reentrância travado. Toda entrada que altera
/// estado passa por aqui; o guard é liberado mesmo quando `body` falha.
fn guarded<T>(
    env: &Env,
    body: impl FnOnce() -> Result<T, PresaleError>,
) -> Result<T, PresaleError> {
    // === REENTRANCY GUARD ===
    if storage::is_reentrancy_locked(env) {
        return Err(PresaleError::Reentrant);
    }
    storage::set_reentrancy_guard(env, true);

    let result = body();

    // === LIBERAR GUARD ===
    storage::set_reentrancy_guard(env, false);
    result
}

/// Operação administrativa padrão: guard, admin, bump.
fn admin_op<T>(
    env: &Env,
    caller: &Address,
    body: impl FnOnce() -> Result<T, PresaleError>,
) -> Result<T, PresaleError> {
    guarded(env, || {
        validation::require_admin(env, caller)?;
        storage::bump_critical_storage(env);
        body()
    })
}

/// Altera as regras por meio de `edit`, revalida e grava. Vale na hora para a
/// rodada em andamento.
fn update_rules(
    env: &Env,
    caller: &Address,
    edit: impl FnOnce(&mut SaleRules),
) -> Result<SaleRules, PresaleError> {
    admin_op(env, caller, || {
        let config = storage::get_config(env)?;
        let mut rules = storage::get_rules(env)?;
        edit(&mut rules);
        validation::require_valid_rules(&rules, config.sale_start, config.sale_end)?;

        storage::set_rules(env, &rules);
        events::emit_rules(env, &rules);
        Ok(rules)
    })
}

//
// CONTRATO PRINCIPAL - PRESALE
//

#[contract]
pub struct PresaleContract;

#[contractimpl]
impl PresaleContract {

    //
    // INICIALIZAÇÃO
    //

    /// Inicializa a venda.
    ///
    /// # Parâmetros
    /// - `admin`: endereço do administrador
    /// - `sale_token`: token vendido
    /// - `params`: janela, preço base, limite por endereço e oferta
    /// - `rules`: multiplicadores, durações e flags de whitelist das rodadas
    /// - `tranches`: parcelas de vesting, ordenadas e somando 100%
    /// - `payment_tokens`: stablecoins aceitas; os decimais são lidos de cada token
    ///
    /// # Erros
    /// - `AlreadyInitialized`: se o contrato já foi inicializado
    /// - erros de configuração para qualquer parâmetro inválido
    pub fn initialize(
        env: Env,
        admin: Address,
        sale_token: Address,
        params: SaleParams,
        rules: SaleRules,
        tranches: Vec<VestingTranche>,
        payment_tokens: Vec<Address>,
    ) -> Result<(), PresaleError> {
        // CHECKS
        if storage::has_admin(&env) {
            return Err(PresaleError::AlreadyInitialized);
        }
        admin.require_auth();

        validation::require_valid_params(&params)?;
        validation::require_valid_rules(&rules, params.sale_start, params.sale_end)?;
        vesting::validate_tranches(&tranches)?;
        validation::require_valid_payment_tokens(&sale_token, &payment_tokens)?;

        let sale_token_decimals = payments::decimals_of(&env, &sale_token)?;
        let mut accepted = Vec::new(&env);
        for token in payment_tokens.iter() {
            let decimals = payments::decimals_of(&env, &token)?;
            accepted.push_back(PaymentToken { token, decimals });
        }

        // EFFECTS
        let config = SaleConfig {
            sale_token: sale_token.clone(),
            sale_token_decimals,
            sale_start: params.sale_start,
            sale_end: params.sale_end,
            base_price: params.base_price,
            per_address_allowance: params.per_address_allowance,
            sale_token_amount: params.sale_token_amount,
        };
        storage::set_admin(&env, &admin);
        storage::set_paused(&env, false);
        storage::set_config(&env, &config);
        storage::set_rules(&env, &rules);
        storage::set_tranches(&env, &tranches);
        storage::set_payment_tokens(&env, &accepted);
        storage::set_sold(&env, 0);
        storage::bump_critical_storage(&env);

        // INTERACTIONS
        events::emit_init(&env, &admin, &sale_token, params.sale_start, params.sale_end);

        Ok(())
    }

    /// Deposita a oferta anunciada, vinda do admin. Uma única vez.
    pub fn deposit_sale_tokens(env: Env, caller: Address) -> Result<i128, PresaleError> {
        admin_op(&env, &caller, || admin::deposit_sale_tokens(&env, &caller))
    }

    //
    // COMPRA E CLAIM
    //

    /// Compra tokens pagando `payment_amount` de `payment_token`.
    ///
    /// # Padrão CEI
    /// 1. CHECKS: pausa, rodada, whitelist, token, limite, oferta
    /// 2. EFFECTS: registro do comprador, vendido, histórico
    /// 3. INTERACTIONS: pagamento puxado do comprador e evento
    pub fn purchase(
        env: Env,
        buyer: Address,
        payment_token: Address,
        payment_amount: i128,
    ) -> Result<PurchaseReceipt, PresaleError> {
        guarded(&env, || {
            buyer.require_auth();
            storage::bump_critical_storage(&env);
            let now = env.ledger().timestamp();

            let receipt = sale::execute_purchase(&env, &buyer, &payment_token, payment_amount, now)?;

            events::emit_buy(
                &env,
                &buyer,
                receipt.round,
                &payment_token,
                payment_amount,
                receipt.token_amount,
            );
            Ok(receipt)
        })
    }

    /// Saca os tokens já liberados pelo vesting. Só depois do fim da venda.
    pub fn claim(env: Env, buyer: Address) -> Result<i128, PresaleError> {
        guarded(&env, || {
            buyer.require_auth();
            storage::bump_critical_storage(&env);
            let now = env.ledger().timestamp();

            let released = sale::execute_claim(&env, &buyer, now)?;

            events::emit_claim(&env, &buyer, released);
            Ok(released)
        })
    }

    //
    // SAQUES DO ADMIN
    //

    /// Envia a sobra não vendida e o saldo de `other_tokens` para
    /// `destination`. Os tokens reservados para claims ficam.
    pub fn withdraw_all(
        env: Env,
        caller: Address,
        destination: Address,
        other_tokens: Vec<Address>,
    ) -> Result<i128, PresaleError> {
        admin_op(&env, &caller, || {
            admin::withdraw_all(&env, &destination, &other_tokens)
        })
    }

    /// Recupera um token alheio à venda enviado por engano.
    pub fn give_back_token(
        env: Env,
        caller: Address,
        destination: Address,
        token_address: Address,
    ) -> Result<i128, PresaleError> {
        admin_op(&env, &caller, || {
            admin::give_back_token(&env, &destination, &token_address)
        })
    }

    //
    // REGRAS DAS RODADAS
    //

    /// Substitui todas as regras de uma vez.
    pub fn set_sale_rules(env: Env, caller: Address, rules: SaleRules) -> Result<(), PresaleError> {
        update_rules(&env, &caller, |r| *r = rules).map(|_| ())
    }

    pub fn set_round2_multiplier(env: Env, caller: Address, multiplier: u32) -> Result<(), PresaleError> {
        update_rules(&env, &caller, |r| r.round2_multiplier = multiplier).map(|_| ())
    }

    pub fn set_fcfs_multiplier(env: Env, caller: Address, multiplier: u32) -> Result<(), PresaleError> {
        update_rules(&env, &caller, |r| r.fcfs_multiplier = multiplier).map(|_| ())
    }

    pub fn set_round2_duration(env: Env, caller: Address, seconds: u64) -> Result<(), PresaleError> {
        update_rules(&env, &caller, |r| r.round2_duration = seconds).map(|_| ())
    }

    pub fn set_fcfs_duration(env: Env, caller: Address, seconds: u64) -> Result<(), PresaleError> {
        update_rules(&env, &caller, |r| r.fcfs_duration = seconds).map(|_| ())
    }

    pub fn set_round2_requires_whitelist(env: Env, caller: Address, required: bool) -> Result<(), PresaleError> {
        update_rules(&env, &caller, |r| r.round2_requires_whitelist = required).map(|_| ())
    }

    pub fn set_fcfs_requires_whitelist(env: Env, caller: Address, required: bool) -> Result<(), PresaleError> {
        update_rules(&env, &caller, |r| r.fcfs_requires_whitelist = required).map(|_| ())
    }

    //
    // PAUSA, WHITELIST E ADMIN
    //

    pub fn set_pause(env: Env, caller: Address, paused: bool) -> Result<(), PresaleError> {
        admin_op(&env, &caller, || {
            storage::set_paused(&env, paused);
            events::emit_pause(&env, paused);
            Ok(())
        })
    }

    pub fn add_whitelist(env: Env, caller: Address, addr: Address) -> Result<(), PresaleError> {
        admin_op(&env, &caller, || {
            whitelist::set(&env, &addr, true);
            Ok(())
        })
    }

    pub fn remove_whitelist(env: Env, caller: Address, addr: Address) -> Result<(), PresaleError> {
        admin_op(&env, &caller, || {
            whitelist::set(&env, &addr, false);
            Ok(())
        })
    }

    /// Adiciona o lote inteiro ou nenhum endereço.
    pub fn add_whitelist_batch(env: Env, caller: Address, addrs: Vec<Address>) -> Result<u32, PresaleError> {
        admin_op(&env, &caller, || whitelist::set_batch(&env, &addrs, true))
    }

    /// Remove o lote inteiro ou nenhum endereço.
    pub fn remove_whitelist_batch(env: Env, caller: Address, addrs: Vec<Address>) -> Result<u32, PresaleError> {
        admin_op(&env, &caller, || whitelist::set_batch(&env, &addrs, false))
    }

    pub fn transfer_admin(env: Env, caller: Address, new_admin: Address) -> Result<(), PresaleError> {
        admin_op(&env, &caller, || {
            storage::set_admin(&env, &new_admin);
            events::emit_admin_transfer(&env, &caller, &new_admin);
            Ok(())
        })
    }

    //
    // HISTÓRICO (apenas admin)
    //

    pub fn get_buy_history(
        env: Env,
        caller: Address,
        start: u32,
        limit: u32,
    ) -> Result<Vec<BuyHistoryEntry>, PresaleError> {
        validation::require_admin(&env, &caller)?;
        Ok(history::page(&env, start, limit))
    }

    pub fn get_buy_history_len(env: Env, caller: Address) -> Result<u32, PresaleError> {
        validation::require_admin(&env, &caller)?;
        Ok(history::len(&env))
    }

    //
    // LEITURA
    // Sem efeitos colaterais além do bump de TTL.
    //

    pub fn get_sold_token_amount(env: Env) -> i128 {
        storage::get_sold(&env)
    }

    pub fn get_total_claimed(env: Env) -> i128 {
        storage::get_total_claimed(&env)
    }

    pub fn get_current_round(env: Env) -> Result<Round, PresaleError> {
        sale::current_round(&env, env.ledger().timestamp())
    }

    pub fn get_sale_config(env: Env) -> Result<SaleConfig, PresaleError> {
        storage::bump_critical_storage(&env);
        storage::get_config(&env)
    }

    pub fn get_sale_rules(env: Env) -> Result<SaleRules, PresaleError> {
        storage::bump_critical_storage(&env);
        storage::get_rules(&env)
    }

    pub fn get_payment_tokens(env: Env) -> Vec<PaymentToken> {
        storage::get_payment_tokens(&env)
    }

    pub fn get_tranches(env: Env) -> Result<Vec<VestingTranche>, PresaleError> {
        storage::get_tranches(&env)
    }

    pub fn get_purchase_record(env: Env, buyer: Address) -> Option<PurchaseRecord> {
        storage::get_purchase(&env, &buyer)
    }

    pub fn get_remaining_allowance(env: Env, buyer: Address) -> Result<i128, PresaleError> {
        sale::remaining_allowance(&env, &buyer, env.ledger().timestamp())
    }

    pub fn get_vested_amount(env: Env, buyer: Address) -> Result<i128, PresaleError> {
        sale::vested_of(&env, &buyer, env.ledger().timestamp())
    }

    pub fn get_claimable_amount(env: Env, buyer: Address) -> Result<i128, PresaleError> {
        sale::claimable_of(&env, &buyer, env.ledger().timestamp())
    }

    pub fn is_whitelisted(env: Env, addr: Address) -> bool {
        whitelist::is_whitelisted(&env, &addr)
    }

    pub fn is_paused(env: Env) -> bool {
        storage::is_paused(&env)
    }

    pub fn get_admin(env: Env) -> Result<Address, PresaleError> {
        storage::bump_critical_storage(&env);
        storage::get_admin(&env)
    }
}

//
// TESTES UNITÁRIOS
//
