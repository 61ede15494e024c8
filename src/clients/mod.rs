//! Client handles over the actors, plus the two role surfaces built on them.

#[macro_use]
mod macros;

pub mod account_client;
pub mod courier_client;
pub mod customer_client;
pub mod order_client;

pub use account_client::*;
pub use courier_client::*;
pub use customer_client::*;
pub use order_client::*;
