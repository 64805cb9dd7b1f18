//! Periodic rebalancing and its trigger

use super::LeverageStrategy;
use crate::adapters::{ConversionAdapter, LendingAdapter};
use crate::error::StrategyResult;
use crate::types::{Address, HostContext};

/// Why a tend is or is not wanted, in evaluation order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TendStatus {
    /// Market may seize collateral; bypasses every other check
    Liquidatable,
    /// Nothing under management
    NothingManaged,
    /// Supply or borrow paused on the market
    MarketPaused,
    /// Leverage above the ceiling; bypasses the interval check
    AboveMaxLeverage,
    /// Minimum interval since the last tend has not elapsed
    TooSoon,
    /// Idle mode with leverage still open
    UnwindPending,
    /// Above the band with a way to delever
    OverLeveraged,
    /// Below the band with deposit capacity to grow into
    UnderLeveraged,
    /// Idle assets worth deploying
    IdleAssets,
    /// A rebalance is wanted but host cost is above the ceiling
    HostCostTooHigh,
    /// Nothing to do
    Balanced,
}

impl TendStatus {
    pub fn should_tend(&self) -> bool {
        matches!(
            self,
            TendStatus::Liquidatable
                | TendStatus::AboveMaxLeverage
                | TendStatus::UnwindPending
                | TendStatus::OverLeveraged
                | TendStatus::UnderLeveraged
                | TendStatus::IdleAssets
        )
    }

    /// Higher is more urgent; 0 for statuses that should not tend
    pub fn urgency(&self) -> u8 {
        match self {
            TendStatus::Liquidatable => 6,
            TendStatus::AboveMaxLeverage => 5,
            TendStatus::UnwindPending => 4,
            TendStatus::OverLeveraged => 3,
            TendStatus::UnderLeveraged => 2,
            TendStatus::IdleAssets => 1,
            _ => 0,
        }
    }
}

impl<L: LendingAdapter, C: ConversionAdapter> LeverageStrategy<L, C> {
    /// Deploy idle assets toward target and record the tend time
    pub fn tend(&mut self, caller: &Address, now: u64) -> StrategyResult<()> {
        self.roles.require_keeper(caller)?;
        self.atomically("tend", |s| {
            let idle = s.wallet.asset;
            log::info!("Tend: leverage {} idle {}", s.current_leverage_ratio(), idle);
            s.lever_inner(idle)?;
            s.limits.last_tend_timestamp = now;
            Ok(())
        })
    }

    /// Whether a keeper should call [`tend`](Self::tend) now
    pub fn tend_trigger(&self, host: &HostContext) -> bool {
        self.tend_status(host).should_tend()
    }

    pub fn tend_status(&self, host: &HostContext) -> TendStatus {
        if self.is_liquidatable() {
            return TendStatus::Liquidatable;
        }
        if host.total_assets == 0 {
            return TendStatus::NothingManaged;
        }
        if self.lending.is_supply_paused() || self.lending.is_borrow_paused() {
            return TendStatus::MarketPaused;
        }

        let leverage = self.current_leverage_ratio();
        if leverage > self.params.max_leverage_ratio {
            return TendStatus::AboveMaxLeverage;
        }
        if !self.limits.tend_interval_elapsed(host.now) {
            return TendStatus::TooSoon;
        }

        if self.params.is_idle() {
            return if leverage > 0 {
                TendStatus::UnwindPending
            } else {
                TendStatus::Balanced
            };
        }

        let idle = self.wallet.asset;
        let wanted = if leverage > self.params.upper_bound()
            && (idle > 0 || self.lending.max_flash_borrow() > 0)
        {
            Some(TendStatus::OverLeveraged)
        } else if leverage > 0
            && leverage < self.params.lower_bound()
            && self.deposit_capacity() > 0
        {
            Some(TendStatus::UnderLeveraged)
        } else if idle > self.limits.min_amount_to_borrow && self.deposit_capacity() > 0 {
            Some(TendStatus::IdleAssets)
        } else {
            None
        };

        match wanted {
            Some(_) if !self.limits.gas_price_ok(host.gas_price) => TendStatus::HostCostTooHigh,
            Some(status) => status,
            None => TendStatus::Balanced,
        }
    }
}
