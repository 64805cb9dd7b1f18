//! Manual primitives for the emergency admin

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::error::StrategyResult;
use crate::flash::FlashBorrowRequest;
use crate::types::Address;
use model_leverage::math::{add_u128, min_u128, pad_bps};

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    pub fn manual_supply_collateral(&mut self, caller: &Address, amount: u128) -> StrategyResult<()> {
        self.roles.require_emergency(caller)?;
        self.atomically("manual_supply_collateral", |s| s.supply_collateral(amount))
    }

    pub fn manual_withdraw_collateral(&mut self, caller: &Address, amount: u128) -> StrategyResult<()> {
        self.roles.require_emergency(caller)?;
        self.atomically("manual_withdraw_collateral", |s| s.withdraw_collateral(amount))
    }

    pub fn manual_borrow(&mut self, caller: &Address, amount: u128) -> StrategyResult<()> {
        self.roles.require_emergency(caller)?;
        self.atomically("manual_borrow", |s| s.borrow(amount))
    }

    pub fn manual_repay(&mut self, caller: &Address, amount: u128) -> StrategyResult<()> {
        self.roles.require_emergency(caller)?;
        self.atomically("manual_repay", |s| s.repay(amount))
    }

    pub fn manual_convert_asset_to_collateral(
        &mut self,
        caller: &Address,
        amount: u128,
    ) -> StrategyResult<u128> {
        self.roles.require_emergency(caller)?;
        self.atomically("manual_convert_asset_to_collateral", |s| {
            s.convert_asset_to_collateral(amount)
        })
    }

    pub fn manual_convert_collateral_to_asset(
        &mut self,
        caller: &Address,
        amount: u128,
    ) -> StrategyResult<u128> {
        self.roles.require_emergency(caller)?;
        self.atomically("manual_convert_collateral_to_asset", |s| {
            s.convert_collateral_to_asset(amount)
        })
    }

    /// Repay all debt and bring every unit of collateral back as asset
    ///
    /// Uses one flash borrow capped at available liquidity; if that does not
    /// cover the debt the position is unwound as far as it allows.
    pub fn emergency_full_unwind(&mut self, caller: &Address) -> StrategyResult<()> {
        self.roles.require_emergency(caller)?;
        self.atomically("emergency_full_unwind", |s| {
            let debt = s.lending.debt();
            log::warn!("Emergency unwind: debt {} collateral {}", debt, s.lending.collateral_balance());

            if debt > 0 {
                let idle_repay = min_u128(s.wallet.asset, debt);
                s.repay(idle_repay)?;

                let remaining = debt - idle_repay;
                let flash = min_u128(remaining, s.lending.max_flash_borrow());
                if flash > 0 {
                    let balance = s.lending.collateral_balance();
                    // a partial repay can only free what covers the flash
                    let collateral_to_free = if flash == remaining {
                        balance
                    } else {
                        let owed = add_u128(flash, s.lending.flash_premium(flash));
                        min_u128(
                            s.asset_to_collateral_up(pad_bps(owed, s.limits.slippage_bps)),
                            balance,
                        )
                    };
                    s.flash_borrow(FlashBorrowRequest::deleverage(collateral_to_free), flash)?;
                }
            }
            s.unwind_collateral()
        })
    }
}
