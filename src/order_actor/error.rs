use thiserror::Error;

/// Errors that can occur during order operations.
///
/// These are precondition violations and communication failures. A transition
/// attempted from the wrong status is not an error; see
/// [`Transition::Ignored`](super::Transition::Ignored).
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Account {0} has an order awaiting verification")]
    AccountLocked(String),
    #[error("A photo is required to {0}")]
    MissingPhoto(&'static str),
    #[error("Cart for store {0} is empty")]
    EmptyCart(String),
    #[error("Unknown store: {0}")]
    UnknownStore(String),
    #[error("Unknown product {product_id} in store {store_id}")]
    UnknownProduct { store_id: String, product_id: String },
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Order validation error: {0}")]
    ValidationError(String),
    #[error("Settlement failed for order {order_id}: {reason}")]
    Settlement { order_id: String, reason: String },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}
