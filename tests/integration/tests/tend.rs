//! Tend trigger precedence and tend execution

use looper_integration_tests::*;
use looper_sim::MarketConfig;
use looper_strategy::{HostContext, LendingAdapter, RuntimeLimits, StrategyError, TendStatus, WAD};

fn host(strategy: &SimStrategy, now: u64) -> HostContext {
    HostContext {
        total_assets: strategy.estimated_total_assets(),
        gas_price: 0,
        now,
    }
}

/// One hour between tends, last tend at t = 1,000
fn hourly() -> SimStrategy {
    let limits = RuntimeLimits {
        min_tend_interval: 3_600,
        ..RuntimeLimits::default()
    };
    let mut strategy = build(three_x(), MarketConfig::default(), limits);
    deposit(&mut strategy, tokens(10_000));
    strategy.tend(&keeper(), 1_000).unwrap();
    strategy
}

#[test]
fn test_balanced_position_needs_no_tend() {
    let strategy = levered();
    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::Balanced);
    assert!(!strategy.tend_trigger(&host(&strategy, 10)));
}

#[test]
fn test_liquidatable_beats_paused() {
    let mut strategy = levered();

    // 30,000 collateral at 0.74 = 22,200 against 20,000 debt: 90.1% LTV
    set_price(&mut strategy, 74 * WAD / 100);
    strategy.lending_mut().set_paused(true, true);

    assert!(strategy.is_liquidatable());
    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::Liquidatable);
    assert!(strategy.tend_trigger(&host(&strategy, 10)));
}

#[test]
fn test_paused_market_blocks_tend_trigger() {
    let mut strategy = levered();
    set_price(&mut strategy, 9 * WAD / 10);
    strategy.lending_mut().set_paused(false, true);

    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::MarketPaused);
}

#[test]
fn test_nothing_managed() {
    let strategy = fresh();
    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::NothingManaged);
}

#[test]
fn test_above_max_beats_interval() {
    let mut strategy = hourly();

    // 23,400 against 20,000: about 6.9x, above the 5x ceiling but not
    // yet liquidatable
    set_price(&mut strategy, 78 * WAD / 100);
    assert!(!strategy.is_liquidatable());

    assert_eq!(strategy.tend_status(&host(&strategy, 1_001)), TendStatus::AboveMaxLeverage);
}

#[test]
fn test_over_leverage_waits_for_interval() {
    let mut strategy = hourly();
    set_price(&mut strategy, 9 * WAD / 10);

    assert_eq!(strategy.tend_status(&host(&strategy, 2_000)), TendStatus::TooSoon);
    assert_eq!(strategy.tend_status(&host(&strategy, 4_600)), TendStatus::OverLeveraged);
}

#[test]
fn test_under_leveraged_and_idle_assets() {
    let mut strategy = levered();
    strategy.receive_asset(tokens(500));
    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::IdleAssets);

    set_price(&mut strategy, 12 * WAD / 10);
    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::UnderLeveraged);

    strategy.tend(&keeper(), 10).unwrap();
    assert_eq!(strategy.idle_assets(), 0);
    assert!(in_band(&strategy));
    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::Balanced);
}

#[test]
fn test_deposit_limit_suppresses_idle_trigger() {
    let mut strategy = levered();
    strategy.receive_asset(tokens(500));
    strategy.set_deposit_limit(&management(), tokens(10_000)).unwrap();

    // no room left under the cap, so idle assets are not worth a tend
    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::Balanced);
}

#[test]
fn test_gas_ceiling_defers_tend() {
    let mut strategy = levered();
    strategy.set_max_gas_price_to_tend(&management(), 50).unwrap();
    set_price(&mut strategy, 9 * WAD / 10);

    let mut context = host(&strategy, 10);
    context.gas_price = 51;
    assert_eq!(strategy.tend_status(&context), TendStatus::HostCostTooHigh);

    context.gas_price = 50;
    assert_eq!(strategy.tend_status(&context), TendStatus::OverLeveraged);
}

#[test]
fn test_idle_mode_unwind_pending_then_tended() {
    let mut strategy = levered();
    strategy.set_leverage_params(&management(), 0, 0, 5 * WAD).unwrap();
    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::UnwindPending);

    strategy.tend(&keeper(), 10).unwrap();
    assert_eq!(strategy.lending().debt(), 0);
    assert_eq!(strategy.lending().collateral_balance(), 0);
    assert_eq!(strategy.tend_status(&host(&strategy, 10)), TendStatus::Balanced);
}

#[test]
fn test_tend_requires_keeper() {
    let mut strategy = levered();

    let err = strategy.tend(&rogue(), 10).unwrap_err();
    assert_eq!(err, StrategyError::Unauthorized(ROGUE.to_string()));

    // management may also tend
    strategy.tend(&management(), 10).unwrap();
    assert_eq!(strategy.limits().last_tend_timestamp, 10);
}
