use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents a financial account that can contain multiple transactions.
///
/// `balance` is a materialized view over the transactions referencing the
/// account; the [`Ledger`](super::Ledger) recomputes it on every relevant
/// mutation and it must never be set independently.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    #[serde(default)]
    pub balance: f64,
}

impl Account {
    /// Creates a new account with a zero balance.
    pub fn new(name: impl Into<String>, kind: AccountKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            kind,
            balance: 0.0,
        }
    }
}

/// Supported account classifications.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountKind {
    Cash,
    Bank,
    Card,
}
