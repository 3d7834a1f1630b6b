use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{
    account::Account,
    category::Category,
    expansion::expand_month,
    recurrence::{RecurrenceException, RecurrenceRule},
    transaction::Transaction,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// The state container owned by the composition root: all accounts,
/// categories, transactions, recurrence rules, and exceptions of one user.
/// Mutation helpers keep account balances in sync with the transaction set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub accounts: Vec<Account>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub rules: Vec<RecurrenceRule>,
    #[serde(default)]
    pub exceptions: Vec<RecurrenceException>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            accounts: Vec::new(),
            categories: Vec::new(),
            transactions: Vec::new(),
            rules: Vec::new(),
            exceptions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    pub fn add_account(&mut self, account: Account) -> Uuid {
        let id = account.id;
        self.accounts.push(account);
        self.touch();
        id
    }

    pub fn add_category(&mut self, category: Category) -> Uuid {
        let id = category.id;
        self.categories.push(category);
        self.touch();
        id
    }

    pub fn add_transaction(&mut self, transaction: Transaction) -> Uuid {
        let id = transaction.id;
        let account_id = transaction.account_id;
        self.transactions.push(transaction);
        self.recompute_balance(account_id);
        self.touch();
        id
    }

    pub fn remove_transaction(&mut self, id: Uuid) -> Option<Transaction> {
        let index = self.transactions.iter().position(|txn| txn.id == id)?;
        let removed = self.transactions.remove(index);
        self.recompute_balance(removed.account_id);
        self.touch();
        Some(removed)
    }

    pub fn add_rule(&mut self, rule: RecurrenceRule) -> Uuid {
        let id = rule.id;
        self.rules.push(rule);
        self.touch();
        id
    }

    pub fn account(&self, id: Uuid) -> Option<&Account> {
        self.accounts.iter().find(|account| account.id == id)
    }

    pub fn account_mut(&mut self, id: Uuid) -> Option<&mut Account> {
        self.accounts.iter_mut().find(|account| account.id == id)
    }

    pub fn category(&self, id: Uuid) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }

    pub fn category_mut(&mut self, id: Uuid) -> Option<&mut Category> {
        self.categories.iter_mut().find(|category| category.id == id)
    }

    /// Display label for a possibly-dangling category reference.
    pub fn category_label(&self, id: Uuid) -> &str {
        self.category(id)
            .map_or(UNCATEGORIZED_LABEL, |category| category.name.as_str())
    }

    pub fn transaction(&self, id: Uuid) -> Option<&Transaction> {
        self.transactions.iter().find(|txn| txn.id == id)
    }

    pub fn transaction_mut(&mut self, id: Uuid) -> Option<&mut Transaction> {
        self.transactions.iter_mut().find(|txn| txn.id == id)
    }

    pub fn rule(&self, id: Uuid) -> Option<&RecurrenceRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    pub fn rule_mut(&mut self, id: Uuid) -> Option<&mut RecurrenceRule> {
        self.rules.iter_mut().find(|rule| rule.id == id)
    }

    /// Recomputes the materialized balance of one account from scratch.
    pub fn recompute_balance(&mut self, account_id: Uuid) {
        let balance = self
            .transactions
            .iter()
            .filter(|txn| txn.account_id == account_id)
            .map(Transaction::signed_amount)
            .sum();
        if let Some(account) = self.account_mut(account_id) {
            account.balance = balance;
        }
    }

    pub fn recompute_all_balances(&mut self) {
        let ids: Vec<Uuid> = self.accounts.iter().map(|account| account.id).collect();
        for id in ids {
            self.recompute_balance(id);
        }
    }

    /// Runs recurrence expansion for the given month (1-12) and merges the
    /// generated transactions into the store. This is the single merge point
    /// for engine output; invoke it whenever the displayed month changes or
    /// the rule set changes. Returns the number of transactions created.
    pub fn materialize_month(&mut self, year: i32, month: u32) -> usize {
        let generated = expand_month(
            &self.rules,
            &self.transactions,
            year,
            month,
            &self.exceptions,
        );
        let created = generated.len();
        if created == 0 {
            return 0;
        }
        let affected: HashSet<Uuid> = generated.iter().map(|txn| txn.account_id).collect();
        self.transactions.extend(generated);
        for account_id in affected {
            self.recompute_balance(account_id);
        }
        self.touch();
        tracing::debug!(year, month, created, "materialized recurring transactions");
        created
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }
}
