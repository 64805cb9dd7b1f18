//! Position health as seen by the keeper

use crate::position::PaperStrategy;
use looper_strategy::{HostContext, TendStatus, WAD};

/// Point-in-time view of one position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionHealth {
    pub name: String,
    pub status: TendStatus,
    /// Current leverage (WAD)
    pub leverage: u128,
    /// Current LTV (WAD)
    pub ltv: u128,
    pub total_assets: u128,
    pub last_update: u64,
}

impl PositionHealth {
    pub fn needs_tend(&self) -> bool {
        self.status.should_tend()
    }
}

/// Evaluate the tend trigger for one position
pub fn assess(name: &str, strategy: &PaperStrategy, gas_price: u128, now: u64) -> PositionHealth {
    let total_assets = strategy.estimated_total_assets();
    let host = HostContext {
        total_assets,
        gas_price,
        now,
    };

    PositionHealth {
        name: name.to_string(),
        status: strategy.tend_status(&host),
        leverage: strategy.current_leverage_ratio(),
        ltv: strategy.current_ltv(),
        total_assets,
        last_update: now,
    }
}

/// Render a WAD value with four decimals for logs
pub fn format_wad(value: u128) -> String {
    if value == u128::MAX {
        return "inf".to_string();
    }
    let whole = value / WAD;
    let frac = (value % WAD) / (WAD / 10_000);
    format!("{}.{:04}", whole, frac)
}
