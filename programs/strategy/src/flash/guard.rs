//! In-flight marker for self-issued flash borrows

use crate::error::{StrategyError, StrategyResult};

/// Set immediately before a flash borrow is opened and cleared right after it
/// closes. The callback is only honoured while set, and only for the amount
/// that was requested.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlashGuard {
    in_flight: Option<u128>,
}

impl FlashGuard {
    pub fn enter(&mut self, amount: u128) -> StrategyResult<()> {
        if self.in_flight.is_some() {
            return Err(StrategyError::FlashBorrowInFlight);
        }
        self.in_flight = Some(amount);
        Ok(())
    }

    pub fn exit(&mut self) {
        self.in_flight = None;
    }

    /// The outstanding borrow is ours and of exactly `amount`
    pub fn expects(&self, amount: u128) -> bool {
        self.in_flight == Some(amount)
    }
}
