use crate::adapters::AdapterError;
use model_leverage::ParamsError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrategyError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    #[error("caller {0} is not authorized")]
    Unauthorized(String),

    #[error("flash borrow callback without an active self-issued borrow")]
    UntrustedCallback,

    #[error("flash borrow already in flight")]
    FlashBorrowInFlight,

    #[error("invalid flash borrow payload")]
    InvalidFlashPayload,

    #[error("insufficient capacity: requested {requested}, available {available}")]
    InsufficientCapacity { requested: u128, available: u128 },

    #[error("slippage exceeded: expected at least {expected}, received {received}")]
    SlippageViolation { expected: u128, received: u128 },

    #[error("insufficient {token} balance: needed {needed}, available {available}")]
    InsufficientBalance {
        token: &'static str,
        needed: u128,
        available: u128,
    },

    #[error("flash loan not repaid: owed {owed}, available {available}")]
    FlashLoanNotRepaid { owed: u128, available: u128 },

    #[error("leverage {leverage} at or above max {max}")]
    LeverageAboveMax { leverage: u128, max: u128 },

    #[error("arithmetic error")]
    Arithmetic,

    #[error("adapter error: {0}")]
    Adapter(#[from] AdapterError),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Leverage(#[from] ParamsError),

    #[error("slippage {0} bps above 100%")]
    SlippageTooHigh(u128),
}

impl From<ParamsError> for StrategyError {
    fn from(e: ParamsError) -> Self {
        StrategyError::Configuration(ConfigError::Leverage(e))
    }
}

pub type StrategyResult<T> = Result<T, StrategyError>;
