//! Live position projection over the lending adapter

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use model_leverage::math::add_u128;
use model_leverage::{
    asset_to_collateral, asset_to_collateral_up, collateral_to_asset, target_position, Position,
    TargetPosition,
};

/// Where the position sits relative to the configured band
///
/// Derived on demand, never stored.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LeverageState {
    NoPosition,
    UnderLeveraged,
    AtTarget,
    OverLeveraged,
    AboveMax,
}

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    /// `(collateral value, debt)` from the market, uncached
    pub fn position(&self) -> Position {
        Position::from_balances(
            self.lending.collateral_balance(),
            self.lending.debt(),
            self.lending.oracle_price(),
        )
    }

    pub fn current_leverage_ratio(&self) -> u128 {
        self.position().leverage_ratio()
    }

    pub fn current_ltv(&self) -> u128 {
        self.position().ltv()
    }

    pub fn target_position(&self, equity: u128) -> TargetPosition {
        target_position(equity, self.params.target_leverage_ratio)
    }

    pub fn is_liquidatable(&self) -> bool {
        self.position()
            .is_liquidatable(self.lending.liquidation_threshold())
    }

    pub fn leverage_state(&self) -> LeverageState {
        let position = self.position();
        if position.is_empty() {
            return LeverageState::NoPosition;
        }
        let leverage = position.leverage_ratio();
        if leverage > self.params.max_leverage_ratio {
            LeverageState::AboveMax
        } else if leverage > self.params.upper_bound() {
            LeverageState::OverLeveraged
        } else if leverage < self.params.lower_bound() {
            LeverageState::UnderLeveraged
        } else {
            LeverageState::AtTarget
        }
    }

    /// Idle asset + wallet collateral + position equity, in asset units
    pub fn estimated_total_assets(&self) -> u128 {
        let price = self.lending.oracle_price();
        let held = add_u128(
            self.wallet.asset,
            collateral_to_asset(self.wallet.collateral, price),
        );
        add_u128(held, self.position().equity())
    }

    pub fn asset_to_collateral(&self, amount: u128) -> u128 {
        asset_to_collateral(amount, self.lending.oracle_price())
    }

    pub(crate) fn asset_to_collateral_up(&self, amount: u128) -> u128 {
        asset_to_collateral_up(amount, self.lending.oracle_price())
    }

    pub fn collateral_to_asset(&self, amount: u128) -> u128 {
        collateral_to_asset(amount, self.lending.oracle_price())
    }
}
