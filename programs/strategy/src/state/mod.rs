pub mod limits;
pub mod roles;
pub mod wallet;

pub use limits::*;
pub use roles::*;
pub use wallet::*;
