//! Deposit and withdraw limits reported to the host

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::types::Address;
use model_leverage::math::{sub_u128, WAD};
use model_leverage::{max_withdraw, DepositCapacity};

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    /// Largest deposit `depositor` may make right now (0 when blocked)
    pub fn available_deposit_limit(&self, depositor: &Address) -> u128 {
        if !self.limits.depositors.permits(depositor) {
            return 0;
        }
        self.deposit_capacity()
    }

    /// Deposit room ignoring the depositor policy
    pub(crate) fn deposit_capacity(&self) -> u128 {
        if self.lending.is_supply_paused() || self.lending.is_borrow_paused() {
            return 0;
        }
        let caps = DepositCapacity {
            remaining_cap: sub_u128(self.limits.deposit_limit, self.estimated_total_assets()),
            collateral_capacity_value: self.collateral_to_asset(self.lending.max_collateral_capacity()),
            borrow_capacity: self.lending.max_borrow_capacity(),
        };
        caps.max_deposit(self.params.target_leverage_ratio, self.limits.slippage_bps)
    }

    /// Largest withdrawal that stays atomically unwindable
    ///
    /// `u128::MAX` when one flash borrow can repay all debt.
    pub fn available_withdraw_limit(&self, _owner: &Address) -> u128 {
        let position = self.position();
        let target = self.params.target_leverage_ratio;
        let leverage = if target > WAD {
            target
        } else {
            position.leverage_ratio()
        };
        max_withdraw(&position, self.lending.max_flash_borrow(), leverage)
    }
}
