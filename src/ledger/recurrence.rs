use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::period::Quincena;
use super::transaction::{Transaction, TransactionKind};

/// Suffix appended to notes on transactions synthesized by expansion.
pub const AUTO_NOTE_SUFFIX: &str = "(auto)";

/// Template describing a transaction that reappears every month or every
/// half-month, anchored to a day-of-month.
///
/// Generated instances never fall strictly before `start_date` or strictly
/// after `end_date` (when set). A biweekly rule yields exactly one instance
/// per month, pinned inside its quincena; it does not mean "every 14 days".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecurrenceRule {
    pub id: Uuid,
    pub frequency: Frequency,
    /// Inclusive day the rule becomes active.
    pub start_date: NaiveDate,
    /// Inclusive upper bound; `None` keeps the rule open-ended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: Uuid,
    pub account_id: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Anchor day-of-month (1-31), clamped to the target month's length.
    pub base_day: u32,
}

impl RecurrenceRule {
    /// Creates a rule anchored at the given transaction-shaped values. The
    /// anchor day is taken from `start_date`.
    pub fn new(
        frequency: Frequency,
        start_date: NaiveDate,
        amount: f64,
        kind: TransactionKind,
        category_id: Uuid,
        account_id: Uuid,
        note: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            frequency,
            start_date,
            end_date: None,
            amount,
            kind,
            category_id,
            account_id,
            note,
            base_day: start_date.day(),
        }
    }

    /// True when `date` lies inside the rule's inclusive activity bounds.
    pub fn covers(&self, date: NaiveDate) -> bool {
        if date < self.start_date {
            return false;
        }
        match self.end_date {
            Some(end) => date <= end,
            None => true,
        }
    }

    /// Synthesizes the concrete transaction for one expansion candidate.
    pub fn materialize(&self, date: NaiveDate) -> Transaction {
        let note = match &self.note {
            Some(text) => format!("{text} {AUTO_NOTE_SUFFIX}"),
            None => AUTO_NOTE_SUFFIX.to_string(),
        };
        let mut txn = Transaction::new(self.amount, self.kind, date, self.category_id, self.account_id)
            .with_note(note);
        txn.link_rule(self.id);
        txn
    }
}

/// How often a rule fires. A biweekly rule is pinned to one half of the
/// month, so the quincena travels with the variant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Frequency {
    Biweekly(Quincena),
    Monthly,
}

/// Marks one dated instance of a rule as explicitly deleted by the user, so
/// expansion never regenerates that slot. Created only by single-instance
/// deletion; whole-series deletion removes the rule instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecurrenceException {
    pub rule_id: Uuid,
    pub date: NaiveDate,
}

impl RecurrenceException {
    pub fn new(rule_id: Uuid, date: NaiveDate) -> Self {
        Self { rule_id, date }
    }
}
