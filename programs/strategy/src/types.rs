//! Shared identifier types

use std::fmt;

/// Opaque account identifier for roles, depositors and adapters
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub String);

impl Address {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Address {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Host-supplied context for the tend predicate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostContext {
    /// Total value the host vault has under management
    pub total_assets: u128,
    /// Current host execution cost (e.g. base fee)
    pub gas_price: u128,
    /// Current timestamp in seconds
    pub now: u64,
}
