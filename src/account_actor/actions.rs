/// Custom actions for Account entities.
#[derive(Debug, Clone, PartialEq)]
pub enum AccountAction {
    /// Takes the single-outstanding-order lock.
    ///
    /// # Errors
    /// Fails if the account is already locked.
    Lock,
    /// Debits the fee and clears the lock.
    Settle { fee: f64 },
    /// Clears the lock without charging. Used when order creation fails
    /// after the lock was taken.
    Release,
}

/// Results from AccountActions - variants match 1:1 with AccountAction
#[derive(Debug, Clone, PartialEq)]
pub enum AccountActionResult {
    Locked,
    /// Carries the balance after the debit.
    Settled { balance: f64 },
    Released,
}
