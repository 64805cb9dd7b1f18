//! Flash borrow callback trust boundary and atomic rollback

use looper_integration_tests::*;
use looper_sim::MarketConfig;
use looper_strategy::{
    AdapterError, Address, FlashBorrowRequest, LendingAdapter, StrategyError, WAD,
};

#[test]
fn test_callback_from_untrusted_caller_rejected() {
    let mut strategy = levered();
    let payload = FlashBorrowRequest::leverage(tokens(1_000)).encode();

    let err = strategy
        .on_flash_borrow(&rogue(), tokens(1_000), 0, &payload)
        .unwrap_err();
    assert_eq!(err, StrategyError::UntrustedCallback);
}

#[test]
fn test_callback_without_borrow_in_flight_rejected() {
    let mut strategy = levered();
    let lender: Address = strategy.lending().id().clone();
    let payload = FlashBorrowRequest::deleverage(tokens(30_000)).encode();

    // right lender, but nothing was borrowed
    let err = strategy
        .on_flash_borrow(&lender, tokens(20_000), 0, &payload)
        .unwrap_err();
    assert_eq!(err, StrategyError::UntrustedCallback);

    assert_eq!(strategy.lending().collateral_balance(), tokens(30_000));
    assert_eq!(strategy.lending().debt(), tokens(20_000));
}

#[test]
fn test_slippage_abort_rolls_back_everything() {
    let mut strategy = levered();
    strategy.receive_asset(tokens(1_000));

    // 1% fee against a 0.5% tolerance
    strategy.conversion_mut().set_fee_bps(100);
    let wallet_before = *strategy.wallet();
    let market_before = strategy.lending().clone();

    let err = strategy.lever(tokens(1_000)).unwrap_err();
    assert!(matches!(
        err,
        StrategyError::Adapter(AdapterError::SlippageExceeded { .. })
    ));

    assert_eq!(*strategy.wallet(), wallet_before);
    assert_eq!(*strategy.lending(), market_before);
    assert_eq!(strategy.idle_assets(), tokens(1_000));

    // no flash borrow left marked in flight
    strategy.conversion_mut().set_fee_bps(0);
    strategy.lever(tokens(1_000)).unwrap();
    assert_eq!(strategy.lending().debt(), tokens(22_000));
}

#[test]
fn test_lever_capped_by_borrow_capacity() {
    let mut strategy = fresh();
    strategy.lending_mut().set_borrow_liquidity(tokens(1_000));

    // only 1,000 can be borrowed back, so only 1,000 is flash borrowed
    deposit(&mut strategy, tokens(10_000));
    assert_eq!(strategy.lending().collateral_balance(), tokens(11_000));
    assert_eq!(strategy.lending().debt(), tokens(1_000));
}

#[test]
fn test_lever_aborted_when_market_refuses_borrow() {
    let market = MarketConfig {
        max_ltv: WAD / 2,
        ..MarketConfig::default()
    };
    let mut strategy = build(three_x(), market, limits());
    strategy.receive_asset(tokens(10_000));

    // 3x needs 66% LTV; the callback's borrow fails and the lever unwinds
    let err = strategy.deploy_funds(tokens(10_000)).unwrap_err();
    println!("deploy aborted: {}", err);
    assert!(matches!(err, StrategyError::Adapter(AdapterError::Unhealthy { .. })));

    assert_eq!(strategy.lending().collateral_balance(), 0);
    assert_eq!(strategy.lending().debt(), 0);
    assert_eq!(strategy.idle_assets(), tokens(10_000));
}

#[test]
fn test_tend_failure_keeps_last_tend_timestamp() {
    let mut strategy = levered();
    strategy.tend(&keeper(), 100).unwrap();
    assert_eq!(strategy.limits().last_tend_timestamp, 100);

    // over-leverage by price, then make the swap back unacceptable
    set_price(&mut strategy, 9 * WAD / 10);
    strategy.conversion_mut().set_fee_bps(100);

    assert!(strategy.tend(&keeper(), 200).is_err());
    assert_eq!(strategy.limits().last_tend_timestamp, 100);
}

#[test]
fn test_payload_rejects_bad_input() {
    assert_eq!(
        FlashBorrowRequest::decode(&[7u8; 17]),
        Err(StrategyError::InvalidFlashPayload)
    );
    assert_eq!(
        FlashBorrowRequest::decode(&[0u8; 5]),
        Err(StrategyError::InvalidFlashPayload)
    );
}
