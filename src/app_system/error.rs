use thiserror::Error;

use crate::account_actor::AccountError;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to seed customer account: {0}")]
    Startup(#[from] AccountError),
    #[error("Actor task failed: {0}")]
    Shutdown(String),
}
