//! Position accounting
//!
//! A position is never stored: it is projected from the collateral balance,
//! the debt and the oracle price every time it is needed. All values are
//! asset-denominated unless the name says otherwise.

use crate::math::*;

/// Asset-denominated snapshot of a lending position
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Position {
    /// Collateral balance valued in asset units
    pub collateral_value: u128,
    /// Outstanding debt including accrued interest
    pub debt: u128,
}

/// Collateral and debt a given equity should be spread into
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TargetPosition {
    pub collateral: u128,
    pub debt: u128,
}

impl Position {
    /// Build a position from a raw collateral balance and the oracle price
    /// (asset per collateral unit, WAD)
    pub fn from_balances(collateral_balance: u128, debt: u128, price: u128) -> Self {
        Self {
            collateral_value: collateral_to_asset(collateral_balance, price),
            debt,
        }
    }

    /// Collateral value minus debt (floored at 0)
    pub fn equity(&self) -> u128 {
        sub_u128(self.collateral_value, self.debt)
    }

    /// Leverage ratio (WAD)
    ///
    /// - 0 when there is no collateral
    /// - `u128::MAX` when debt has caught up with collateral
    pub fn leverage_ratio(&self) -> u128 {
        leverage_ratio(self.collateral_value, self.debt)
    }

    /// Loan-to-value (WAD), 0 when there is no collateral
    pub fn ltv(&self) -> u128 {
        ltv(self.collateral_value, self.debt)
    }

    /// Debt has reached the liquidation threshold (WAD LTV)
    pub fn is_liquidatable(&self, liquidation_threshold: u128) -> bool {
        self.debt > 0 && self.ltv() >= liquidation_threshold
    }

    pub fn is_empty(&self) -> bool {
        self.collateral_value == 0 && self.debt == 0
    }
}

/// `collateral * WAD / (collateral - debt)`, saturated when unhealthy
pub fn leverage_ratio(collateral_value: u128, debt: u128) -> u128 {
    if collateral_value == 0 {
        return 0;
    }
    if debt >= collateral_value {
        return u128::MAX;
    }
    mul_div(collateral_value, WAD, collateral_value - debt)
}

/// `debt * WAD / collateral`
pub fn ltv(collateral_value: u128, debt: u128) -> u128 {
    mul_div(debt, WAD, collateral_value)
}

/// Spread `equity` at `target_leverage` (WAD)
///
/// `collateral = equity * target / WAD`, `debt = max(0, collateral - equity)`.
/// A target below 1x (including idle mode, target 0) yields zero debt.
pub fn target_position(equity: u128, target_leverage: u128) -> TargetPosition {
    let collateral = wad_mul(equity, target_leverage);
    TargetPosition {
        collateral,
        debt: sub_u128(collateral, equity),
    }
}

/// Convert an asset amount to collateral units at `price` (asset per collateral, WAD)
pub fn asset_to_collateral(amount: u128, price: u128) -> u128 {
    mul_div(amount, WAD, price)
}

/// Like [`asset_to_collateral`] but rounded up, so converting back never
/// comes out short
pub fn asset_to_collateral_up(amount: u128, price: u128) -> u128 {
    mul_div_up(amount, WAD, price)
}

/// Convert a collateral amount to asset units at `price`
pub fn collateral_to_asset(amount: u128, price: u128) -> u128 {
    mul_div(amount, price, WAD)
}

/// Max LTV implied by a leverage ceiling: `WAD - WAD^2 / max`
///
/// A zero ceiling implies full LTV.
pub fn implied_max_ltv(max_leverage: u128) -> u128 {
    if max_leverage == 0 {
        return WAD;
    }
    sub_u128(WAD, mul_div(WAD, WAD, max_leverage))
}
