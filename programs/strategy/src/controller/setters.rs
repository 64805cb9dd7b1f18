//! Management setters
//!
//! Every setter checks the caller first and validates before writing, so a
//! rejected call changes nothing.

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::error::{ConfigError, StrategyResult};
use crate::state::DepositorPolicy;
use crate::types::Address;
use model_leverage::math::BPS;
use model_leverage::LeverageParams;

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    /// Set target, buffer and ceiling leverage (WAD)
    ///
    /// Rejected unless idle mode (`0, 0`) or `target >= 1x`, `buffer >=
    /// MIN_LEVERAGE_BUFFER`, `target > buffer`; and always unless `max >=
    /// target + buffer` with the LTV implied by `max` strictly below the
    /// market's liquidation threshold.
    pub fn set_leverage_params(
        &mut self,
        caller: &Address,
        target: u128,
        buffer: u128,
        max: u128,
    ) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        let params = LeverageParams::new(target, buffer, max);
        params.validate(self.lending.liquidation_threshold())?;

        log::info!("Leverage params set: target {} buffer {} max {}", target, buffer, max);
        self.params = params;
        Ok(())
    }

    pub fn set_slippage_bps(&mut self, caller: &Address, slippage_bps: u128) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        if slippage_bps > BPS {
            return Err(ConfigError::SlippageTooHigh(slippage_bps).into());
        }
        self.limits.slippage_bps = slippage_bps;
        Ok(())
    }

    pub fn set_deposit_limit(&mut self, caller: &Address, limit: u128) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        self.limits.deposit_limit = limit;
        Ok(())
    }

    pub fn set_max_amount_to_swap(&mut self, caller: &Address, amount: u128) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        self.limits.max_amount_to_swap = amount;
        Ok(())
    }

    pub fn set_min_amount_to_borrow(&mut self, caller: &Address, amount: u128) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        self.limits.min_amount_to_borrow = amount;
        Ok(())
    }

    pub fn set_max_gas_price_to_tend(&mut self, caller: &Address, price: u128) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        self.limits.max_gas_price_to_tend = price;
        Ok(())
    }

    pub fn set_min_tend_interval(&mut self, caller: &Address, seconds: u64) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        self.limits.min_tend_interval = seconds;
        Ok(())
    }

    pub fn set_depositor_policy(&mut self, caller: &Address, policy: DepositorPolicy) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        self.limits.depositors = policy;
        Ok(())
    }

    pub fn set_allowed(&mut self, caller: &Address, depositor: &Address, allowed: bool) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        self.limits.depositors.set_allowed(depositor, allowed);
        Ok(())
    }

    pub fn set_keeper(&mut self, caller: &Address, keeper: Address) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        self.roles.keeper = keeper;
        Ok(())
    }

    pub fn set_emergency_admin(&mut self, caller: &Address, admin: Address) -> StrategyResult<()> {
        self.roles.require_management(caller)?;
        self.roles.emergency_admin = admin;
        Ok(())
    }
}
