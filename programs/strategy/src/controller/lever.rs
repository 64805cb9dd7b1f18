//! Deploy assets toward the target leverage

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::error::StrategyResult;
use crate::flash::FlashBorrowRequest;
use model_leverage::math::{add_u128, min_u128, pad_bps, sub_u128};

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    /// Deploy `amount` of idle asset while moving toward target leverage
    pub fn lever(&mut self, amount: u128) -> StrategyResult<()> {
        self.atomically("lever", |s| s.lever_inner(amount))
    }

    pub(crate) fn lever_inner(&mut self, amount: u128) -> StrategyResult<()> {
        let position = self.position();
        let debt = position.debt;
        let equity = add_u128(position.equity(), amount);
        let target_debt = self.target_position(equity).debt;

        log::debug!(
            "lever: amount {} equity {} debt {} target debt {}",
            amount,
            equity,
            debt,
            target_debt
        );

        if target_debt > debt {
            self.lever_up(amount, debt, target_debt - debt)
        } else if debt > target_debt {
            self.lever_down(amount, debt - target_debt)
        } else {
            self.supply_idle(amount)
        }
    }

    /// Add `debt_needed` of debt, flash-borrowing it in one step
    fn lever_up(&mut self, amount: u128, debt: u128, debt_needed: u128) -> StrategyResult<()> {
        let mut flash = min_u128(debt_needed, self.lending.max_flash_borrow());

        // the callback borrows flash + premium from the market
        let borrow_room = self.lending.max_borrow_capacity();
        if add_u128(flash, self.lending.flash_premium(flash)) > borrow_room {
            flash = sub_u128(borrow_room, self.lending.flash_premium(borrow_room));
        }

        let ceiling = self.limits.max_amount_to_swap;
        if add_u128(amount, flash) > ceiling {
            if amount > ceiling {
                log::info!("lever: deposit {} above swap ceiling {}, supplying ceiling only", amount, ceiling);
                return self.convert_and_supply(ceiling);
            }
            flash = ceiling - amount;
        }

        if flash <= self.limits.min_amount_to_borrow {
            let repay = min_u128(amount, debt);
            log::debug!("lever: flash {} uneconomical, repaying {}", flash, repay);
            return self.repay(repay);
        }

        log::info!("lever: flash borrowing {} to lever {}", flash, amount);
        self.flash_borrow(FlashBorrowRequest::leverage(amount), flash)
    }

    /// Shed `debt_to_repay`, from the deposit first and a flash borrow for the rest
    fn lever_down(&mut self, amount: u128, debt_to_repay: u128) -> StrategyResult<()> {
        if amount >= debt_to_repay {
            self.repay(debt_to_repay)?;
            return self.supply_idle(amount - debt_to_repay);
        }

        self.repay(amount)?;

        let shortfall = debt_to_repay - amount;
        let flash = min_u128(shortfall, self.lending.max_flash_borrow());
        if flash == 0 {
            log::warn!("lever: no flash liquidity to repay {}", shortfall);
            return Ok(());
        }

        // idle mode frees everything once the last of the debt goes
        let balance = self.lending.collateral_balance();
        let full_unwind = self.params.is_idle() && flash == self.lending.debt();
        let collateral_to_free = if full_unwind {
            balance
        } else {
            let owed = add_u128(flash, self.lending.flash_premium(flash));
            min_u128(
                self.asset_to_collateral_up(pad_bps(owed, self.limits.slippage_bps)),
                balance,
            )
        };

        log::info!(
            "lever: flash borrowing {} to deleverage, freeing {} collateral",
            flash,
            collateral_to_free
        );
        self.flash_borrow(FlashBorrowRequest::deleverage(collateral_to_free), flash)
    }
}
