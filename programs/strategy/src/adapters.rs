//! Capability interfaces for the lending market and the swap venue
//!
//! The controller depends only on these traits. Amounts are in native units
//! of the token the method names (asset or collateral); prices and ratios are
//! WAD.

use crate::types::Address;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AdapterError {
    #[error("market paused")]
    Paused,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("insufficient liquidity: requested {requested}, available {available}")]
    InsufficientLiquidity { requested: u128, available: u128 },

    #[error("capacity exceeded: requested {requested}, available {available}")]
    CapacityExceeded { requested: u128, available: u128 },

    #[error("insufficient collateral: requested {requested}, supplied {supplied}")]
    InsufficientCollateral { requested: u128, supplied: u128 },

    #[error("position would be unhealthy: ltv {ltv}, threshold {threshold}")]
    Unhealthy { ltv: u128, threshold: u128 },

    #[error("conversion output {out} below minimum {min_out}")]
    SlippageExceeded { min_out: u128, out: u128 },

    #[error("flash borrow already outstanding")]
    FlashBorrowOutstanding,

    #[error("flash borrow not repaid: owed {owed}, repaid {repaid}")]
    FlashBorrowNotRepaid { owed: u128, repaid: u128 },
}

/// Undo support for collaborators
///
/// On a host that executes each call as one transaction the runtime provides
/// atomicity and `rollback` is never reached. Elsewhere the controller takes a
/// checkpoint before every mutating operation and restores it on failure.
pub trait Checkpoint {
    type Snapshot;

    fn checkpoint(&self) -> Self::Snapshot;

    fn rollback(&mut self, snapshot: Self::Snapshot);
}

/// An open flash borrow, consumed when it is closed
#[derive(Debug, PartialEq, Eq)]
pub struct FlashLoan {
    /// Identity of the lender that sent the funds
    pub lender: Address,
    /// Borrowed asset amount
    pub amount: u128,
    /// Fee owed on top of `amount`
    pub premium: u128,
}

impl FlashLoan {
    pub fn owed(&self) -> u128 {
        self.amount.saturating_add(self.premium)
    }
}

/// Lending market holding the strategy's collateral and debt
pub trait LendingAdapter: Checkpoint {
    /// Identity the market presents when it initiates a callback
    fn id(&self) -> &Address;

    /// Supplied collateral (collateral units)
    fn collateral_balance(&self) -> u128;

    /// Debt including accrued interest (asset units)
    fn debt(&self) -> u128;

    /// Asset per collateral unit (WAD)
    fn oracle_price(&self) -> u128;

    /// LTV at which the market may seize collateral (WAD)
    fn liquidation_threshold(&self) -> u128;

    fn is_supply_paused(&self) -> bool;

    fn is_borrow_paused(&self) -> bool;

    /// Collateral the market still accepts (collateral units)
    fn max_collateral_capacity(&self) -> u128;

    /// Asset the market can still lend
    fn max_borrow_capacity(&self) -> u128;

    /// Asset available to flash borrow right now
    fn max_flash_borrow(&self) -> u128;

    /// Fee charged on a flash borrow of `amount`
    fn flash_premium(&self, amount: u128) -> u128;

    fn supply_collateral(&mut self, amount: u128) -> Result<(), AdapterError>;

    fn withdraw_collateral(&mut self, amount: u128) -> Result<(), AdapterError>;

    fn borrow(&mut self, amount: u128) -> Result<(), AdapterError>;

    fn repay(&mut self, amount: u128) -> Result<(), AdapterError>;

    /// Send `amount` asset to the strategy and record it as owed
    fn open_flash_borrow(&mut self, amount: u128) -> Result<FlashLoan, AdapterError>;

    /// Take back `repayment`; must cover `loan.owed()`
    fn close_flash_borrow(&mut self, loan: FlashLoan, repayment: u128) -> Result<(), AdapterError>;
}

/// Swap venue between the asset and the collateral token
pub trait ConversionAdapter: Checkpoint {
    /// Swap `amount` asset, failing if fewer than `min_out` collateral come back
    fn convert_asset_to_collateral(&mut self, amount: u128, min_out: u128) -> Result<u128, AdapterError>;

    /// Swap `amount` collateral, failing if fewer than `min_out` asset come back
    fn convert_collateral_to_asset(&mut self, amount: u128, min_out: u128) -> Result<u128, AdapterError>;
}
