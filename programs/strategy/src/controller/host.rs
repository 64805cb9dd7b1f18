//! Entry points driven by the host vault
//!
//! Share accounting stays with the host; these only move asset in and out of
//! the position.

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::error::StrategyResult;
use model_leverage::math::{min_u128, sub_u128};

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    /// Record asset transferred in by the host
    pub fn receive_asset(&mut self, amount: u128) {
        self.wallet.credit_asset(amount);
    }

    /// Lever a fresh deposit already held in the wallet
    pub fn deploy_funds(&mut self, amount: u128) -> StrategyResult<()> {
        self.atomically("deploy_funds", |s| s.lever_inner(amount))
    }

    /// Free `amount` and hand it back to the host
    ///
    /// Idle asset is used first. Returns what was actually released, which is
    /// less than `amount` only when the position cannot free enough.
    pub fn free_funds(&mut self, amount: u128) -> StrategyResult<u128> {
        self.atomically("free_funds", |s| {
            let shortfall = sub_u128(amount, s.wallet.asset);
            if shortfall > 0 {
                s.delever_inner(shortfall)?;
            }
            let released = min_u128(amount, s.wallet.asset);
            s.wallet.debit_asset(released)?;
            if released < amount {
                log::warn!("free_funds: released {} of {}", released, amount);
            }
            Ok(released)
        })
    }

    /// Total assets for the host's profit and loss report
    pub fn harvest_and_report(&self) -> u128 {
        let total = self.estimated_total_assets();
        log::info!(
            "Harvest: total assets {} leverage {} ltv {}",
            total,
            self.current_leverage_ratio(),
            self.current_ltv()
        );
        total
    }
}
