//! Flash borrow request encoding and the in-flight guard
//!
//! The callback itself is implemented on the controller, see
//! `controller::callback`.

pub mod guard;
pub mod request;

pub use guard::*;
pub use request::*;
