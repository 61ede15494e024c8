//! Order-specific domain logic: the lifecycle state machine.

mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;
