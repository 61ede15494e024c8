use super::actions::{AccountAction, AccountActionResult};
use super::error::AccountError;
use crate::actor_framework::Entity;
use crate::domain::{Account, AccountCreate};

impl Entity for Account {
    type Id = String;
    type CreateParams = AccountCreate;
    type Action = AccountAction;
    type ActionResult = AccountActionResult;
    type Error = AccountError;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(id: String, params: AccountCreate) -> Result<Self, AccountError> {
        Ok(Self {
            id,
            name: params.name,
            balance: params.balance,
            is_locked: false,
        })
    }

    /// Handles account-specific actions.
    ///
    /// # Actions
    /// - `Lock`: test-and-set of the lock flag
    /// - `Settle { fee }`: debits the fee and unlocks
    /// - `Release`: unlocks without charging
    fn handle_action(&mut self, action: AccountAction) -> Result<AccountActionResult, AccountError> {
        match action {
            AccountAction::Lock => {
                if self.is_locked {
                    return Err(AccountError::Locked(self.id.clone()));
                }
                self.is_locked = true;
                Ok(AccountActionResult::Locked)
            }
            AccountAction::Settle { fee } => {
                self.balance -= fee;
                self.is_locked = false;
                Ok(AccountActionResult::Settled { balance: self.balance })
            }
            AccountAction::Release => {
                self.is_locked = false;
                Ok(AccountActionResult::Released)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account() -> Account {
        Account::from_create_params(
            "u1".to_string(),
            AccountCreate { name: "Test User".to_string(), balance: 500.0 },
        )
        .unwrap()
    }

    #[test]
    fn lock_is_exclusive() {
        let mut account = account();
        assert_eq!(account.handle_action(AccountAction::Lock), Ok(AccountActionResult::Locked));
        assert_eq!(
            account.handle_action(AccountAction::Lock),
            Err(AccountError::Locked("u1".to_string()))
        );
        assert!(account.is_locked);
    }

    #[test]
    fn settle_debits_fee_and_unlocks() {
        let mut account = account();
        account.handle_action(AccountAction::Lock).unwrap();

        let result = account.handle_action(AccountAction::Settle { fee: 15.0 }).unwrap();
        assert_eq!(result, AccountActionResult::Settled { balance: 485.0 });
        assert!(!account.is_locked);
    }

    #[test]
    fn release_unlocks_without_charging() {
        let mut account = account();
        account.handle_action(AccountAction::Lock).unwrap();
        account.handle_action(AccountAction::Release).unwrap();
        assert!(!account.is_locked);
        assert_eq!(account.balance, 500.0);
    }
}
