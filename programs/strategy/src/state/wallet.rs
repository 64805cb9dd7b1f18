//! Balances held by the strategy itself

use crate::error::{StrategyError, StrategyResult};

/// Uncommitted asset and collateral
///
/// Asset sits here between host deposits and deployment, and while a flash
/// borrow is outstanding. Collateral sits here between a conversion and the
/// following supply or after a withdrawal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Wallet {
    pub asset: u128,
    pub collateral: u128,
}

impl Wallet {
    pub fn credit_asset(&mut self, amount: u128) {
        self.asset = self.asset.saturating_add(amount);
    }

    pub fn debit_asset(&mut self, amount: u128) -> StrategyResult<()> {
        self.asset = self.asset.checked_sub(amount).ok_or(StrategyError::InsufficientBalance {
            token: "asset",
            needed: amount,
            available: self.asset,
        })?;
        Ok(())
    }

    pub fn credit_collateral(&mut self, amount: u128) {
        self.collateral = self.collateral.saturating_add(amount);
    }

    pub fn debit_collateral(&mut self, amount: u128) -> StrategyResult<()> {
        self.collateral = self
            .collateral
            .checked_sub(amount)
            .ok_or(StrategyError::InsufficientBalance {
                token: "collateral",
                needed: amount,
                available: self.collateral,
            })?;
        Ok(())
    }
}
