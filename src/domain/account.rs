/// The customer account. Only one exists per session.
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: String,
    pub name: String,
    pub balance: f64,
    /// Set while an order awaits delivery verification.
    pub is_locked: bool,
}

/// Payload for creating a new account.
#[derive(Debug, Clone)]
pub struct AccountCreate {
    pub name: String,
    pub balance: f64,
}
