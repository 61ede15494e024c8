pub mod account;
pub mod catalog;
pub mod order;

pub use account::*;
pub use catalog::*;
pub use order::*;
