//! Runtime limits set by management

use crate::types::Address;
use std::collections::BTreeSet;

/// Who may deposit into the strategy
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DepositorPolicy {
    /// Anyone
    Open,
    /// Only listed addresses
    AllowList(BTreeSet<Address>),
}

impl DepositorPolicy {
    pub fn permits(&self, depositor: &Address) -> bool {
        match self {
            DepositorPolicy::Open => true,
            DepositorPolicy::AllowList(list) => list.contains(depositor),
        }
    }

    /// Add or remove one address, switching an open policy to a list first
    pub fn set_allowed(&mut self, depositor: &Address, allowed: bool) {
        if let DepositorPolicy::Open = self {
            *self = DepositorPolicy::AllowList(BTreeSet::new());
        }
        if let DepositorPolicy::AllowList(list) = self {
            if allowed {
                list.insert(depositor.clone());
            } else {
                list.remove(depositor);
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuntimeLimits {
    /// Tolerated conversion loss (basis points)
    pub slippage_bps: u128,

    /// Cap on total assets under management
    pub deposit_limit: u128,

    /// Ceiling on asset converted in one lever (deposit + flash)
    pub max_amount_to_swap: u128,

    /// Flash borrows at or below this are skipped as uneconomical
    pub min_amount_to_borrow: u128,

    /// Host cost above which non-urgent tends are deferred
    pub max_gas_price_to_tend: u128,

    /// Seconds between non-urgent tends
    pub min_tend_interval: u64,

    /// Timestamp of the last tend
    pub last_tend_timestamp: u64,

    pub depositors: DepositorPolicy,
}

impl Default for RuntimeLimits {
    fn default() -> Self {
        Self {
            slippage_bps: 50,       // 0.5%
            deposit_limit: u128::MAX,
            max_amount_to_swap: u128::MAX,
            min_amount_to_borrow: 0,
            max_gas_price_to_tend: u128::MAX,
            min_tend_interval: 3_600, // 1 hour
            last_tend_timestamp: 0,
            depositors: DepositorPolicy::Open,
        }
    }
}

impl RuntimeLimits {
    pub fn tend_interval_elapsed(&self, now: u64) -> bool {
        now.saturating_sub(self.last_tend_timestamp) >= self.min_tend_interval
    }

    pub fn gas_price_ok(&self, gas_price: u128) -> bool {
        gas_price <= self.max_gas_price_to_tend
    }
}
