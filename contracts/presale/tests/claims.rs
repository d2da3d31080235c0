#![cfg(test)]
#![cfg(not(tarpaulin_include))]
use presale::{PresaleError, SaleParams};
use setup::*;
use soroban_sdk::testutils::{Address as _, Events};
use soroban_sdk::{symbol_short, vec, Address, IntoVal, Val, Vec};

// ============================================================================
// CLAIM E VESTING
// ============================================================================

/// Comprador com 100 USD gastos na Round1 = 10.000 tokens.
fn sale_with_buyer<'a>() -> (TestEnv<'a>, Address) {
    let t = TestEnv::new();
    let buyer = t.whitelisted_buyer(100 * UNIT);
    t.set_time(START);
    t.buy_usdc(&buyer, 100);
    (t, buyer)
}

#[test]
fn test_claim_before_sale_end_fails() {
    let (t, buyer) = sale_with_buyer();

    t.set_time(END - 1);
    let res = t.client.try_claim(&buyer);
    assert_eq!(expect_err(res), PresaleError::PresaleNotFinished);
    assert_eq!(t.client.get_claimable_amount(&buyer), 0);
}

#[test]
fn test_claim_without_purchase_fails() {
    let (t, _) = sale_with_buyer();
    let stranger = Address::generate(&t.env);

    t.set_time(END + MONTH);
    let res = t.client.try_claim(&stranger);
    assert_eq!(expect_err(res), PresaleError::NoClaimAmount);
}

#[test]
fn test_claim_follows_tranches() {
    let (t, buyer) = sale_with_buyer();

    t.set_time(END);
    assert_eq!(t.client.get_vested_amount(&buyer), 5_000 * UNIT);
    assert_eq!(t.client.get_claimable_amount(&buyer), 5_000 * UNIT);
    assert_eq!(t.client.claim(&buyer), 5_000 * UNIT);

    // Mesmo instante: nada novo
    let res = t.client.try_claim(&buyer);
    assert_eq!(expect_err(res), PresaleError::NothingToClaim);

    t.set_time(END + MONTH - 1);
    let res = t.client.try_claim(&buyer);
    assert_eq!(expect_err(res), PresaleError::NothingToClaim);

    t.set_time(END + MONTH);
    assert_eq!(t.client.claim(&buyer), 5_000 * UNIT);

    t.set_time(END + 12 * MONTH);
    let res = t.client.try_claim(&buyer);
    assert_eq!(expect_err(res), PresaleError::NothingToClaim);

    let record = t.client.get_purchase_record(&buyer).unwrap();
    assert_eq!(record.claimed, record.purchased);
    assert_eq!(t.client.get_total_claimed(), 10_000 * UNIT);
    assert_eq!(t.balance(&t.sale_token, &buyer), 10_000 * UNIT);
}

#[test]
fn test_late_claim_takes_everything_at_once() {
    let (t, buyer) = sale_with_buyer();

    t.set_time(END + 2 * MONTH);
    assert_eq!(t.client.claim(&buyer), 10_000 * UNIT);
    assert_eq!(t.client.get_claimable_amount(&buyer), 0);
}

#[test]
fn test_odd_amounts_vest_completely() {
    // 0.008 por token: uma unidade mínima de USDC compra 125 unidades mínimas
    let t = TestEnv::bare();
    let cheap = SaleParams { base_price: 8 * ONE / 1000, ..params() };
    t.client.initialize(
        &t.admin,
        &t.sale_token,
        &cheap,
        &rules(),
        &tranches(&t.env),
        &vec![&t.env, t.usdc.clone()],
    );
    t.mint(&t.sale_token, &t.admin, SALE_AMOUNT);
    t.client.deposit_sale_tokens(&t.admin);

    let buyer = t.whitelisted_buyer(UNIT);
    t.set_time(START);
    let tokens = t.client.purchase(&buyer, &t.usdc, &3).token_amount;
    assert_eq!(tokens, 375);

    t.set_time(END);
    let first = t.client.claim(&buyer);
    assert_eq!(first, tokens / 2);

    t.set_time(END + MONTH);
    let second = t.client.claim(&buyer);
    assert_eq!(second, tokens - tokens / 2);
    assert_eq!(first + second, tokens);
    assert_eq!(t.balance(&t.sale_token, &buyer), tokens);
}

#[test]
fn test_claims_are_not_blocked_by_pause() {
    let (t, buyer) = sale_with_buyer();
    t.client.set_pause(&t.admin, &true);

    t.set_time(END);
    assert_eq!(t.client.claim(&buyer), 5_000 * UNIT);
}

#[test]
fn test_claim_without_deposit_rolls_back() {
    let t = TestEnv::bare();
    t.client.initialize(
        &t.admin,
        &t.sale_token,
        &params(),
        &rules(),
        &tranches(&t.env),
        &vec![&t.env, t.usdc.clone()],
    );
    let buyer = t.whitelisted_buyer(100 * UNIT);
    t.set_time(START);
    t.buy_usdc(&buyer, 100);

    // Sem depósito o contrato não tem tokens para entregar
    t.set_time(END);
    let res = t.client.try_claim(&buyer);
    assert_eq!(expect_err(res), PresaleError::TransferFailed);

    assert_eq!(t.client.get_purchase_record(&buyer).unwrap().claimed, 0);
    assert_eq!(t.client.get_total_claimed(), 0);
}

#[test]
fn test_claim_emits_event() {
    let (t, buyer) = sale_with_buyer();
    t.set_time(END);
    t.client.claim(&buyer);

    let events = t.env.events().all();
    let (contract, topics, data) = events.last().unwrap();
    assert_eq!(contract, t.contract_id);
    let expected: Vec<Val> = (symbol_short!("claim"), buyer.clone()).into_val(&t.env);
    assert_eq!(topics, expected);
    let amount: i128 = data.into_val(&t.env);
    assert_eq!(amount, 5_000 * UNIT);
}
