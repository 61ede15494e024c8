use tracing::{debug, instrument};

use crate::account_actor::{AccountAction, AccountActionResult, AccountError};
use crate::actor_framework::{FrameworkError, ResourceClient};
use crate::domain::Account;

impl From<FrameworkError<AccountError>> for AccountError {
    fn from(e: FrameworkError<AccountError>) -> Self {
        match e {
            FrameworkError::Entity(e) => e,
            FrameworkError::NotFound(id) => AccountError::NotFound(id),
            other => AccountError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Client for interacting with the Account actor.
#[derive(Clone)]
pub struct AccountClient {
    inner: ResourceClient<Account>,
}

impl_basic_client!(AccountClient, Account, AccountError, account);

impl AccountClient {
    /// Takes the order lock. Fails with [`AccountError::Locked`] if it is held.
    #[instrument(skip(self))]
    pub async fn lock(&self, id: &str) -> Result<(), AccountError> {
        debug!("Sending request");
        match self.inner.perform_action(id.to_string(), AccountAction::Lock).await? {
            AccountActionResult::Locked => Ok(()),
            other => Err(unexpected(other)),
        }
    }

    /// Debits `fee`, clears the lock and returns the new balance.
    #[instrument(skip(self))]
    pub async fn settle(&self, id: &str, fee: f64) -> Result<f64, AccountError> {
        debug!("Sending request");
        match self.inner.perform_action(id.to_string(), AccountAction::Settle { fee }).await? {
            AccountActionResult::Settled { balance } => Ok(balance),
            other => Err(unexpected(other)),
        }
    }

    #[instrument(skip(self))]
    pub async fn release(&self, id: &str) -> Result<(), AccountError> {
        debug!("Sending request");
        match self.inner.perform_action(id.to_string(), AccountAction::Release).await? {
            AccountActionResult::Released => Ok(()),
            other => Err(unexpected(other)),
        }
    }
}

fn unexpected(result: AccountActionResult) -> AccountError {
    AccountError::ActorCommunicationError(format!("Unexpected result: {result:?}"))
}
