//! In-memory lending market and swap venue
//!
//! Deterministic stand-ins for the adapter traits, used by the integration
//! tests and the keeper's paper mode. Both support checkpoint/rollback by
//! snapshotting their whole state.

pub mod lending;
pub mod swap;

pub use lending::*;
pub use swap::*;
