//! Business logic helpers for managing plain (non-recurring) transactions.

use uuid::Uuid;

use crate::ledger::{Ledger, Transaction};

use super::{ServiceError, ServiceResult};

/// Provides validated CRUD helpers for ledger transactions. Recurring-series
/// mutations live in [`RecurrenceService`](super::RecurrenceService).
pub struct TransactionService;

impl TransactionService {
    /// Adds a new transaction and returns its identifier.
    pub fn add(ledger: &mut Ledger, transaction: Transaction) -> ServiceResult<Uuid> {
        Self::validate(&transaction)?;
        Ok(ledger.add_transaction(transaction))
    }

    /// Updates the transaction identified by `id` via the provided mutator.
    /// Balances of both the original and the (possibly changed) account are
    /// recomputed.
    pub fn update<F>(ledger: &mut Ledger, id: Uuid, mutator: F) -> ServiceResult<()>
    where
        F: FnOnce(&mut Transaction),
    {
        let txn = ledger
            .transaction_mut(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        let previous_account = txn.account_id;
        mutator(txn);
        let validated = ledger
            .transaction(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        Self::validate(&validated)?;
        ledger.recompute_balance(previous_account);
        if validated.account_id != previous_account {
            ledger.recompute_balance(validated.account_id);
        }
        ledger.touch();
        Ok(())
    }

    /// Removes the transaction identified by `id`, returning the removed instance.
    pub fn remove(ledger: &mut Ledger, id: Uuid) -> ServiceResult<Transaction> {
        ledger
            .remove_transaction(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))
    }

    /// Returns a snapshot of the ledger's transactions.
    pub fn list(ledger: &Ledger) -> Vec<&Transaction> {
        ledger.transactions.iter().collect()
    }

    fn validate(transaction: &Transaction) -> ServiceResult<()> {
        if transaction.amount <= 0.0 {
            return Err(ServiceError::Invalid("Amount must be positive".into()));
        }
        if !transaction.is_recurring && transaction.recurrence_rule_id.is_some() {
            return Err(ServiceError::Invalid(
                "Non-recurring transaction cannot reference a rule".into(),
            ));
        }
        Ok(())
    }
}
