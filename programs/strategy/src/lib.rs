//! Leveraged lending position controller
//!
//! Holds collateral borrowed against itself and moves the position between
//! leverage states with flash borrows. Markets and swap venues are reached
//! only through the [`LendingAdapter`] and [`ConversionAdapter`] traits.

pub mod adapters;
pub mod controller;
pub mod error;
pub mod flash;
pub mod state;
pub mod types;

pub use adapters::*;
pub use controller::*;
pub use error::*;
pub use flash::*;
pub use state::*;
pub use types::*;

pub use model_leverage::{LeverageParams, ParamsError, Position, TargetPosition, WAD};
