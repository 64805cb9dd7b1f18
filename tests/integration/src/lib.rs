//! Looper Integration Tests
//!
//! Shared fixtures for driving a [`LeverageStrategy`] over the simulated
//! lending market and swap venue.

use looper_sim::{MarketConfig, SimLendingMarket, SimSwap};
use looper_strategy::{Address, LeverageParams, LeverageStrategy, Roles, RuntimeLimits, WAD};

pub type SimStrategy = LeverageStrategy<SimLendingMarket, SimSwap>;

pub const MANAGEMENT: &str = "management";
pub const KEEPER: &str = "keeper";
pub const GUARDIAN: &str = "guardian";
pub const ROGUE: &str = "rogue";

pub fn management() -> Address {
    Address::new(MANAGEMENT)
}

pub fn keeper() -> Address {
    Address::new(KEEPER)
}

pub fn guardian() -> Address {
    Address::new(GUARDIAN)
}

pub fn rogue() -> Address {
    Address::new(ROGUE)
}

/// Whole tokens to native units
pub fn tokens(n: u128) -> u128 {
    n * WAD
}

/// 3x target, 0.25x buffer, 5x ceiling
pub fn three_x() -> LeverageParams {
    LeverageParams::new(3 * WAD, WAD / 4, 5 * WAD)
}

/// Default limits with no tend interval so every test can tend at will
pub fn limits() -> RuntimeLimits {
    RuntimeLimits {
        min_tend_interval: 0,
        ..RuntimeLimits::default()
    }
}

pub fn build(params: LeverageParams, market: MarketConfig, limits: RuntimeLimits) -> SimStrategy {
    let lending = SimLendingMarket::new("market", market.clone());
    let swap = SimSwap::new(market.price, 0);
    let roles = Roles::new(management(), keeper(), guardian());
    LeverageStrategy::new(lending, swap, roles, params, limits).unwrap()
}

/// Empty 3x strategy on a par market
pub fn fresh() -> SimStrategy {
    build(three_x(), MarketConfig::default(), limits())
}

/// Receive and deploy `amount`
pub fn deposit(strategy: &mut SimStrategy, amount: u128) {
    strategy.receive_asset(amount);
    strategy.deploy_funds(amount).unwrap();
}

/// 10,000 levered to 3x: 30,000 collateral, 20,000 debt
pub fn levered() -> SimStrategy {
    let mut strategy = fresh();
    deposit(&mut strategy, tokens(10_000));
    strategy
}

/// Move the oracle and the swap venue together
pub fn set_price(strategy: &mut SimStrategy, price: u128) {
    strategy.lending_mut().set_price(price);
    strategy.conversion_mut().set_price(price);
}

/// `|a - b| <= tolerance`
pub fn approx(a: u128, b: u128, tolerance: u128) -> bool {
    a.abs_diff(b) <= tolerance
}

/// Leverage inside `[target - buffer, target + buffer]`
pub fn in_band(strategy: &SimStrategy) -> bool {
    let leverage = strategy.current_leverage_ratio();
    let params = strategy.params();
    leverage >= params.lower_bound() && leverage <= params.upper_bound()
}
