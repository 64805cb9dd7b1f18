//! Privileged roles

use crate::error::{StrategyError, StrategyResult};
use crate::types::Address;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Roles {
    /// Parameter setters
    pub management: Address,
    /// Tend execution
    pub keeper: Address,
    /// Manual unwind and primitive operations
    pub emergency_admin: Address,
}

impl Roles {
    pub fn new(management: Address, keeper: Address, emergency_admin: Address) -> Self {
        Self {
            management,
            keeper,
            emergency_admin,
        }
    }

    pub fn require_management(&self, caller: &Address) -> StrategyResult<()> {
        if caller == &self.management {
            Ok(())
        } else {
            Err(StrategyError::Unauthorized(caller.to_string()))
        }
    }

    /// Keeper or management
    pub fn require_keeper(&self, caller: &Address) -> StrategyResult<()> {
        if caller == &self.keeper || caller == &self.management {
            Ok(())
        } else {
            Err(StrategyError::Unauthorized(caller.to_string()))
        }
    }

    /// Emergency admin or management
    pub fn require_emergency(&self, caller: &Address) -> StrategyResult<()> {
        if caller == &self.emergency_admin || caller == &self.management {
            Ok(())
        } else {
            Err(StrategyError::Unauthorized(caller.to_string()))
        }
    }
}
