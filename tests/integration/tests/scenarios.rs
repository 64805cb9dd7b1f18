//! Leverage scenarios over the simulated market
//!
//! Each test starts from a par market (price 1, no swap fee) with unbounded
//! flash liquidity unless it says otherwise.

use looper_integration_tests::*;
use looper_strategy::{LendingAdapter, LeverageState, WAD};
use model_leverage::UNBOUNDED;

/// Scenario A: lever a fresh 10,000 deposit to 3x
#[test]
fn test_scenario_a_lever_to_target() {
    let strategy = levered();

    assert_eq!(strategy.lending().collateral_balance(), tokens(30_000));
    assert_eq!(strategy.lending().debt(), tokens(20_000));
    assert_eq!(strategy.current_leverage_ratio(), 3 * WAD);
    assert!(in_band(&strategy));
    assert_eq!(strategy.leverage_state(), LeverageState::AtTarget);
    assert_eq!(strategy.idle_assets(), 0);
}

/// Scenario B: lowering the target leaves the position over-leveraged until
/// the next lever pulls it back into the new band
#[test]
fn test_scenario_b_lower_target_then_rebalance() {
    let mut strategy = levered();

    strategy
        .set_leverage_params(&management(), 2 * WAD, 3 * WAD / 10, 5 * WAD)
        .unwrap();
    assert!(strategy.current_leverage_ratio() > 2 * WAD + 3 * WAD / 10);
    assert_eq!(strategy.leverage_state(), LeverageState::OverLeveraged);

    let debt_before = strategy.lending().debt();
    strategy.lever(0).unwrap();

    let leverage = strategy.current_leverage_ratio();
    println!("leverage after rebalance: {}", leverage);
    assert!(strategy.lending().debt() < debt_before);
    assert!(leverage >= 17 * WAD / 10 && leverage <= 23 * WAD / 10);
    assert!(in_band(&strategy));
}

/// Scenario C: idle mode unwinds everything and blocks deposits
#[test]
fn test_scenario_c_idle_mode_full_unwind() {
    let mut strategy = levered();

    strategy.set_leverage_params(&management(), 0, 0, 5 * WAD).unwrap();
    strategy.lever(0).unwrap();

    assert_eq!(strategy.lending().debt(), 0);
    assert_eq!(strategy.lending().collateral_balance(), 0);
    assert_eq!(strategy.idle_assets(), tokens(10_000));
    assert_eq!(strategy.available_deposit_limit(&management()), 0);
    assert_eq!(strategy.leverage_state(), LeverageState::NoPosition);
}

/// Scenario D: with flash liquidity below the debt the withdraw limit is the
/// closed-form amount, not the sentinel
#[test]
fn test_scenario_d_withdraw_limit_with_short_flash() {
    let mut strategy = levered();
    strategy.lending_mut().set_flash_liquidity(tokens(15_000));

    // remaining debt 5,000 carried at 3x needs 2,500 equity; 10,000 - 2,500
    let limit = strategy.available_withdraw_limit(&management());
    assert_ne!(limit, UNBOUNDED);
    assert_eq!(limit, tokens(7_500));
}

#[test]
fn test_withdraw_limit_sentinel_when_flash_covers_debt() {
    let mut strategy = levered();

    strategy.lending_mut().set_flash_liquidity(tokens(20_000));
    assert_eq!(strategy.available_withdraw_limit(&management()), UNBOUNDED);

    strategy.lending_mut().set_flash_liquidity(tokens(20_000) - 1);
    assert_ne!(strategy.available_withdraw_limit(&management()), UNBOUNDED);
}

#[test]
fn test_lever_with_flash_premium() {
    let mut strategy = fresh();
    let market_premium_bps = 9;
    let mut config = strategy.lending().config().clone();
    config.flash_premium_bps = market_premium_bps;
    *strategy.lending_mut() = looper_sim::SimLendingMarket::new("market", config);

    deposit(&mut strategy, tokens(10_000));

    // the callback borrows the premium on top of the flash amount
    assert_eq!(strategy.lending().collateral_balance(), tokens(30_000));
    assert_eq!(strategy.lending().debt(), tokens(20_018));
    assert!(in_band(&strategy));
}

#[test]
fn test_lever_respects_swap_ceiling() {
    let mut strategy = levered();
    strategy.set_max_amount_to_swap(&management(), tokens(1_500)).unwrap();

    // 1,000 deposit wants 2,000 flash; only 500 fits under the ceiling
    deposit(&mut strategy, tokens(1_000));

    assert_eq!(strategy.lending().collateral_balance(), tokens(31_500));
    assert_eq!(strategy.lending().debt(), tokens(20_500));
}

#[test]
fn test_lever_deposit_above_swap_ceiling_supplies_ceiling_only() {
    let mut strategy = levered();
    strategy.set_max_amount_to_swap(&management(), tokens(500)).unwrap();

    // the deposit alone is over the ceiling: no flash, half stays idle
    strategy.receive_asset(tokens(1_000));
    strategy.lever(tokens(1_000)).unwrap();

    assert_eq!(strategy.lending().collateral_balance(), tokens(30_500));
    assert_eq!(strategy.lending().debt(), tokens(20_000));
    assert_eq!(strategy.idle_assets(), tokens(500));
}

#[test]
fn test_deposit_covers_repay_on_over_leveraged_position() {
    let mut strategy = levered();
    strategy
        .set_leverage_params(&management(), 2 * WAD, WAD / 4, 5 * WAD)
        .unwrap();

    // 16,000 equity at 2x wants 16,000 debt: 4,000 repaid from the deposit,
    // the other 2,000 supplied
    strategy.receive_asset(tokens(6_000));
    strategy.lever(tokens(6_000)).unwrap();

    assert_eq!(strategy.lending().debt(), tokens(16_000));
    assert_eq!(strategy.lending().collateral_balance(), tokens(32_000));
    assert_eq!(strategy.idle_assets(), 0);
    assert_eq!(strategy.current_leverage_ratio(), 2 * WAD);
    assert!(in_band(&strategy));
}

#[test]
fn test_deposit_repays_then_flash_covers_shortfall() {
    let mut strategy = levered();
    set_price(&mut strategy, 9 * WAD / 10);

    // 7,500 equity at 3x wants 15,000 debt: 500 repaid from the deposit,
    // 4,500 through a flash deleverage
    strategy.receive_asset(tokens(500));
    strategy.lever(tokens(500)).unwrap();

    assert_eq!(strategy.lending().debt(), tokens(15_000));
    let collateral = strategy.lending().collateral_balance();
    assert!(collateral > tokens(24_974) && collateral < tokens(24_975));

    // slippage padding comes back as a little idle asset
    let idle = strategy.idle_assets();
    println!("idle after flash deleverage: {}", idle);
    assert!(idle > tokens(22) && idle < tokens(23));
    assert!(in_band(&strategy));
}

#[test]
fn test_idle_mode_deposit_repays_and_stays_uncommitted() {
    let mut strategy = levered();
    strategy.set_leverage_params(&management(), 0, 0, 5 * WAD).unwrap();

    strategy.receive_asset(tokens(25_000));
    strategy.lever(tokens(25_000)).unwrap();

    // the 5,000 left over is not supplied; the collateral comes back too
    assert_eq!(strategy.lending().debt(), 0);
    assert_eq!(strategy.lending().collateral_balance(), 0);
    assert_eq!(strategy.idle_assets(), tokens(35_000));
}

#[test]
fn test_delever_lands_on_padded_target_debt() {
    let mut strategy = levered();

    // 9,000 equity at 3x is 18,000 debt; the 2,000 repay is padded by the
    // 0.5% tolerance
    strategy.delever(tokens(1_000)).unwrap();

    let padded_repay = model_leverage::math::pad_bps(tokens(2_000), 50);
    assert_eq!(strategy.lending().debt(), tokens(20_000) - padded_repay);
    assert_eq!(
        strategy.lending().collateral_balance(),
        tokens(29_000) - padded_repay
    );
    assert_eq!(strategy.idle_assets(), tokens(1_000));
    assert_eq!(strategy.estimated_total_assets(), tokens(10_000));
    assert!(strategy.current_leverage_ratio() <= 3 * WAD);
    assert!(in_band(&strategy));
}

#[test]
fn test_delever_under_leveraged_withdraws_directly() {
    let mut strategy = levered();

    // 36,000 against 20,000: below target, so nothing needs repaying
    set_price(&mut strategy, 12 * WAD / 10);
    strategy.delever(tokens(1_000)).unwrap();

    assert_eq!(strategy.lending().debt(), tokens(20_000));
    let collateral = strategy.lending().collateral_balance();
    assert!(collateral > tokens(29_160) && collateral < tokens(30_000));
    let idle = strategy.idle_assets();
    assert!(idle >= tokens(1_000) && idle < tokens(1_006));
}

#[test]
fn test_delever_without_flash_liquidity_withdraws_directly() {
    let mut strategy = levered();
    strategy.lending_mut().set_flash_liquidity(0);

    strategy.delever(tokens(1_000)).unwrap();

    assert_eq!(strategy.lending().debt(), tokens(20_000));
    assert!(strategy.lending().collateral_balance() < tokens(29_000));
    assert!(strategy.idle_assets() >= tokens(1_000));
    assert!(strategy.current_leverage_ratio() > 3 * WAD);
}

#[test]
fn test_below_min_borrow_repays_instead() {
    let mut strategy = levered();
    strategy
        .set_min_amount_to_borrow(&management(), tokens(1_000))
        .unwrap();

    // a 100 deposit wants a 200 flash, below the minimum
    deposit(&mut strategy, tokens(100));

    assert_eq!(strategy.lending().debt(), tokens(19_900));
    assert_eq!(strategy.lending().collateral_balance(), tokens(30_000));
    assert_eq!(strategy.idle_assets(), 0);
}

#[test]
fn test_price_drop_then_rebalance() {
    let mut strategy = levered();

    // 30,000 collateral at 0.9 = 27,000 against 20,000 debt: about 3.86x
    set_price(&mut strategy, 9 * WAD / 10);
    assert_eq!(strategy.leverage_state(), LeverageState::OverLeveraged);

    strategy.lever(0).unwrap();
    assert!(in_band(&strategy));
    assert!(approx(strategy.estimated_total_assets(), tokens(7_000), tokens(1)));
}

#[test]
fn test_price_rise_then_rebalance() {
    let mut strategy = levered();

    // 36,000 against 20,000: 2.25x
    set_price(&mut strategy, 12 * WAD / 10);
    assert_eq!(strategy.leverage_state(), LeverageState::UnderLeveraged);

    strategy.lever(0).unwrap();
    assert_eq!(strategy.current_leverage_ratio(), 3 * WAD);
    assert_eq!(strategy.lending().debt(), tokens(32_000));
}
