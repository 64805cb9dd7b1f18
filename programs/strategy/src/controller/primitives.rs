//! Single-step moves between the wallet and the collaborators
//!
//! Each primitive keeps the wallet in step with the adapter call it wraps.
//! Conversions enforce the configured slippage floor on top of whatever the
//! venue checks.

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::error::{StrategyError, StrategyResult};
use model_leverage::math::haircut_bps;

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    pub(crate) fn supply_collateral(&mut self, amount: u128) -> StrategyResult<()> {
        if amount == 0 {
            return Ok(());
        }
        self.wallet.debit_collateral(amount)?;
        self.lending.supply_collateral(amount)?;
        Ok(())
    }

    pub(crate) fn withdraw_collateral(&mut self, amount: u128) -> StrategyResult<()> {
        if amount == 0 {
            return Ok(());
        }
        self.lending.withdraw_collateral(amount)?;
        self.wallet.credit_collateral(amount);
        Ok(())
    }

    pub(crate) fn borrow(&mut self, amount: u128) -> StrategyResult<()> {
        if amount == 0 {
            return Ok(());
        }
        self.lending.borrow(amount)?;
        self.wallet.credit_asset(amount);
        Ok(())
    }

    pub(crate) fn repay(&mut self, amount: u128) -> StrategyResult<()> {
        if amount == 0 {
            return Ok(());
        }
        self.wallet.debit_asset(amount)?;
        self.lending.repay(amount)?;
        Ok(())
    }

    /// Swap asset for collateral at no worse than oracle minus slippage
    pub(crate) fn convert_asset_to_collateral(&mut self, amount: u128) -> StrategyResult<u128> {
        if amount == 0 {
            return Ok(0);
        }
        let min_out = haircut_bps(self.asset_to_collateral(amount), self.limits.slippage_bps);
        self.wallet.debit_asset(amount)?;
        let out = self.conversion.convert_asset_to_collateral(amount, min_out)?;
        if out < min_out {
            return Err(StrategyError::SlippageViolation {
                expected: min_out,
                received: out,
            });
        }
        self.wallet.credit_collateral(out);
        Ok(out)
    }

    /// Swap collateral for asset at no worse than oracle minus slippage
    pub(crate) fn convert_collateral_to_asset(&mut self, amount: u128) -> StrategyResult<u128> {
        if amount == 0 {
            return Ok(0);
        }
        let min_out = haircut_bps(self.collateral_to_asset(amount), self.limits.slippage_bps);
        self.wallet.debit_collateral(amount)?;
        let out = self.conversion.convert_collateral_to_asset(amount, min_out)?;
        if out < min_out {
            return Err(StrategyError::SlippageViolation {
                expected: min_out,
                received: out,
            });
        }
        self.wallet.credit_asset(out);
        Ok(out)
    }

    /// Convert `amount` asset and supply everything that comes back
    pub(crate) fn convert_and_supply(&mut self, amount: u128) -> StrategyResult<()> {
        let collateral = self.convert_asset_to_collateral(amount)?;
        self.supply_collateral(collateral)
    }

    /// Withdraw `amount` collateral and convert it to asset
    pub(crate) fn withdraw_and_convert(&mut self, amount: u128) -> StrategyResult<u128> {
        self.withdraw_collateral(amount)?;
        self.convert_collateral_to_asset(amount)
    }

    /// Put `amount` idle asset to work unleveraged
    ///
    /// In idle mode assets stay uncommitted and any collateral left in the
    /// market is brought back instead.
    pub(crate) fn supply_idle(&mut self, amount: u128) -> StrategyResult<()> {
        if self.params.is_idle() {
            return self.unwind_collateral();
        }
        self.convert_and_supply(amount)
    }

    /// Withdraw and convert all collateral once no debt remains
    pub(crate) fn unwind_collateral(&mut self) -> StrategyResult<()> {
        if self.lending.debt() != 0 {
            return Ok(());
        }
        let balance = self.lending.collateral_balance();
        if balance > 0 {
            log::info!("Unwinding {} collateral", balance);
            self.withdraw_and_convert(balance)?;
        }
        Ok(())
    }
}
