//! Pure fixed-point model of a leveraged lending position
//! No I/O, no unwrap/panic, all functions total

pub mod math;
pub mod position;
pub mod capacity;
pub mod params;

// Re-export commonly used types
pub use math::WAD;
pub use position::*;
pub use capacity::*;
pub use params::*;
