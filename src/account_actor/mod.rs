//! Account-specific domain logic: the order lock and settlement.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
