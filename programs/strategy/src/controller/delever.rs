//! Free assets out of the position

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::error::StrategyResult;
use crate::flash::FlashBorrowRequest;
use model_leverage::math::{add_u128, min_u128, pad_bps, sub_u128};

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    /// Make `amount_needed` asset freely withdrawable, keeping the remaining
    /// equity at target leverage
    pub fn delever(&mut self, amount_needed: u128) -> StrategyResult<()> {
        self.atomically("delever", |s| s.delever_inner(amount_needed))
    }

    pub(crate) fn delever_inner(&mut self, amount_needed: u128) -> StrategyResult<()> {
        if amount_needed == 0 {
            return Ok(());
        }

        let position = self.position();
        let balance = self.lending.collateral_balance();
        let slippage = self.limits.slippage_bps;

        if position.debt == 0 {
            let collateral = min_u128(
                self.asset_to_collateral_up(pad_bps(amount_needed, slippage)),
                balance,
            );
            log::debug!("delever: no debt, withdrawing {} collateral", collateral);
            self.withdraw_and_convert(collateral)?;
            return Ok(());
        }

        let target_equity = sub_u128(position.equity(), amount_needed);
        let target_debt = self.target_position(target_equity).debt;
        let debt_to_repay = min_u128(
            pad_bps(sub_u128(position.debt, target_debt), slippage),
            self.lending.max_flash_borrow(),
        );

        if debt_to_repay == 0 {
            let collateral = min_u128(
                self.asset_to_collateral_up(pad_bps(amount_needed, slippage)),
                balance,
            );
            log::debug!("delever: nothing to repay, withdrawing {} collateral", collateral);
            self.withdraw_and_convert(collateral)?;
            return Ok(());
        }

        // the repay already carries the slippage pad; free only what it and
        // the withdrawal need at the oracle price
        let owed = add_u128(debt_to_repay, self.lending.flash_premium(debt_to_repay));
        let collateral_to_free = self.asset_to_collateral_up(add_u128(owed, amount_needed));

        log::info!(
            "delever: flash borrowing {} to free {} asset ({} collateral)",
            debt_to_repay,
            amount_needed,
            collateral_to_free
        );
        self.flash_borrow(FlashBorrowRequest::deleverage(collateral_to_free), debt_to_repay)
    }
}
