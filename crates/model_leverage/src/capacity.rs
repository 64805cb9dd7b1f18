//! Closed-form deposit and withdraw capacity

use crate::math::*;
use crate::position::Position;

/// Sentinel for "no withdraw limit"
pub const UNBOUNDED: u128 = u128::MAX;

/// Inputs to the deposit capacity formula
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DepositCapacity {
    /// Configured global cap minus current total assets
    pub remaining_cap: u128,
    /// Collateral the market still accepts, valued in asset units
    pub collateral_capacity_value: u128,
    /// Debt the market can still lend
    pub borrow_capacity: u128,
}

impl DepositCapacity {
    /// Largest deposit that can be levered to `target` without exceeding any cap
    ///
    /// Deposits are blocked (0) for targets at or below 1x: the position would
    /// take no debt, so there is nothing the strategy adds over holding.
    pub fn max_deposit(&self, target_leverage: u128, slippage_bps: u128) -> u128 {
        if target_leverage <= WAD {
            return 0;
        }
        let by_collateral = haircut_bps(
            wad_div(self.collateral_capacity_value, target_leverage),
            slippage_bps,
        );
        let by_borrow = wad_div(self.borrow_capacity, target_leverage - WAD);

        min_u128(self.remaining_cap, min_u128(by_collateral, by_borrow))
    }
}

/// Equity that can leave the position while staying atomically unwindable
///
/// When the flash liquidity covers the whole debt any withdrawal can be
/// served, so the limit is [`UNBOUNDED`]. Otherwise the debt that would remain
/// after one maximal flash repay must still be carried at `leverage`:
///
/// `target_debt = debt - flash`, `target_equity = target_debt * WAD / (leverage - WAD)`,
/// limit = `max(0, equity - target_equity)`.
pub fn max_withdraw(position: &Position, flash_capacity: u128, leverage: u128) -> u128 {
    if flash_capacity >= position.debt {
        return UNBOUNDED;
    }
    if leverage <= WAD {
        return 0;
    }
    let target_debt = position.debt - flash_capacity;
    let target_equity = mul_div(target_debt, WAD, leverage - WAD);
    sub_u128(position.equity(), target_equity)
}
