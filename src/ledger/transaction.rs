use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single dated income or expense entry.
///
/// Entries synthesized by recurrence expansion live in the same collection as
/// manually entered ones and are distinguishable only through
/// `recurrence_rule_id`. Invariant: a transaction with `is_recurring == false`
/// carries no `recurrence_rule_id`; use [`Transaction::link_rule`] and
/// [`Transaction::detach_rule`] so the two fields never drift apart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    pub id: Uuid,
    pub amount: f64,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub category_id: Uuid,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurrence_rule_id: Option<Uuid>,
}

impl Transaction {
    pub fn new(
        amount: f64,
        kind: TransactionKind,
        date: NaiveDate,
        category_id: Uuid,
        account_id: Uuid,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            amount,
            kind,
            date,
            category_id,
            account_id,
            note: None,
            is_recurring: false,
            recurrence_rule_id: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Marks the transaction as belonging to the given recurring series.
    pub fn link_rule(&mut self, rule_id: Uuid) {
        self.is_recurring = true;
        self.recurrence_rule_id = Some(rule_id);
    }

    /// Detaches the transaction from its series, making it a plain entry.
    pub fn detach_rule(&mut self) {
        self.is_recurring = false;
        self.recurrence_rule_id = None;
    }

    /// Signed contribution of this entry to an account balance.
    pub fn signed_amount(&self) -> f64 {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

/// Direction of money movement for transactions and categories.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TransactionKind {
    Income,
    Expense,
}
