//! Leverage controller
//!
//! Every public operation re-reads live balances and the oracle price; the
//! only state carried between calls is configuration, the wallet and the last
//! tend timestamp.

pub mod accounting;
pub mod callback;
pub mod capacity;
pub mod delever;
pub mod emergency;
pub mod host;
pub mod lever;
pub mod primitives;
pub mod setters;
pub mod tend;

pub use accounting::*;
pub use tend::*;

use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::error::{ConfigError, StrategyResult};
use crate::flash::FlashGuard;
use crate::state::{Roles, RuntimeLimits, Wallet};
use model_leverage::math::BPS;
use model_leverage::LeverageParams;

pub struct LeverageStrategy<L: LendingAdapter, C: ConversionAdapter> {
    pub(crate) lending: L,
    pub(crate) conversion: C,
    pub(crate) params: LeverageParams,
    pub(crate) limits: RuntimeLimits,
    pub(crate) roles: Roles,
    pub(crate) wallet: Wallet,
    pub(crate) flash: FlashGuard,
}

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    /// Build a controller, validating the initial configuration against the market
    pub fn new(
        lending: L,
        conversion: C,
        roles: Roles,
        params: LeverageParams,
        limits: RuntimeLimits,
    ) -> StrategyResult<Self> {
        params.validate(lending.liquidation_threshold())?;
        if limits.slippage_bps > BPS {
            return Err(ConfigError::SlippageTooHigh(limits.slippage_bps).into());
        }

        log::info!(
            "Strategy created: target {} buffer {} max {}",
            params.target_leverage_ratio,
            params.leverage_buffer,
            params.max_leverage_ratio
        );

        Ok(Self {
            lending,
            conversion,
            params,
            limits,
            roles,
            wallet: Wallet::default(),
            flash: FlashGuard::default(),
        })
    }

    pub fn lending(&self) -> &L {
        &self.lending
    }

    /// Mutable market access for hosts that drive the collaborator directly
    /// (interest accrual, price updates in simulations)
    pub fn lending_mut(&mut self) -> &mut L {
        &mut self.lending
    }

    pub fn conversion(&self) -> &C {
        &self.conversion
    }

    pub fn conversion_mut(&mut self) -> &mut C {
        &mut self.conversion
    }

    pub fn params(&self) -> &LeverageParams {
        &self.params
    }

    pub fn limits(&self) -> &RuntimeLimits {
        &self.limits
    }

    pub fn roles(&self) -> &Roles {
        &self.roles
    }

    pub fn wallet(&self) -> &Wallet {
        &self.wallet
    }

    /// Idle asset balance
    pub fn idle_assets(&self) -> u128 {
        self.wallet.asset
    }

    /// Run `op` so that it either commits fully or leaves no trace
    pub(crate) fn atomically<T>(
        &mut self,
        name: &'static str,
        op: impl FnOnce(&mut Self) -> StrategyResult<T>,
    ) -> StrategyResult<T> {
        let lending = self.lending.checkpoint();
        let conversion = self.conversion.checkpoint();
        let wallet = self.wallet;
        let last_tend = self.limits.last_tend_timestamp;

        match op(self) {
            Ok(value) => Ok(value),
            Err(e) => {
                log::warn!("{} aborted, rolling back: {}", name, e);
                self.lending.rollback(lending);
                self.conversion.rollback(conversion);
                self.wallet = wallet;
                self.limits.last_tend_timestamp = last_tend;
                self.flash.exit();
                Err(e)
            }
        }
    }
}
