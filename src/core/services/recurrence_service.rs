//! Lifecycle of recurring series: creation, single-instance and
//! future-splitting edits, and instance or whole-series deletion.

use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate};
use uuid::Uuid;

use crate::ledger::{
    Frequency, Ledger, RecurrenceException, RecurrenceRule, Transaction, TransactionKind,
};

use super::{ServiceError, ServiceResult};

/// Replacement field values for a single-instance edit.
#[derive(Debug, Clone)]
pub struct TransactionUpdate {
    pub amount: f64,
    pub kind: TransactionKind,
    pub date: NaiveDate,
    pub category_id: Uuid,
    pub account_id: Uuid,
    pub note: Option<String>,
}

/// Replacement field values for a future-splitting edit; applies to the
/// edited instance and to every occurrence from its date onward.
#[derive(Debug, Clone)]
pub struct RecurrenceUpdate {
    pub amount: f64,
    pub kind: TransactionKind,
    pub category_id: Uuid,
    pub account_id: Uuid,
    pub note: Option<String>,
    pub frequency: Frequency,
}

/// Mutation logic for recurring series. Expansion itself stays pure
/// ([`expand_month`](crate::ledger::expand_month)); these operations only
/// maintain consistency between rules, transactions, and exceptions.
pub struct RecurrenceService;

impl RecurrenceService {
    /// Saves a new transaction with recurrence toggled on: a rule is created
    /// anchored at the transaction's date and day-of-month, and the
    /// transaction is linked to it. Returns `(transaction_id, rule_id)`.
    pub fn add_recurring(
        ledger: &mut Ledger,
        mut transaction: Transaction,
        frequency: Frequency,
    ) -> ServiceResult<(Uuid, Uuid)> {
        if transaction.amount <= 0.0 {
            return Err(ServiceError::Invalid("Amount must be positive".into()));
        }
        let rule = Self::rule_from_transaction(&transaction, frequency);
        let rule_id = rule.id;
        transaction.link_rule(rule_id);
        ledger.add_rule(rule);
        let txn_id = ledger.add_transaction(transaction);
        Ok((txn_id, rule_id))
    }

    /// Converts an existing plain transaction into the first instance of a
    /// new recurring series.
    pub fn convert_to_recurring(
        ledger: &mut Ledger,
        id: Uuid,
        frequency: Frequency,
    ) -> ServiceResult<Uuid> {
        let txn = ledger
            .transaction(id)
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        if txn.recurrence_rule_id.is_some() {
            return Err(ServiceError::Invalid(
                "Transaction already belongs to a series".into(),
            ));
        }
        let rule = Self::rule_from_transaction(txn, frequency);
        let rule_id = rule.id;
        ledger.add_rule(rule);
        if let Some(txn) = ledger.transaction_mut(id) {
            txn.link_rule(rule_id);
        }
        ledger.touch();
        Ok(rule_id)
    }

    /// Edits one occurrence only. The edited values land on a fresh
    /// non-recurring transaction; the vacated slot is recorded as an
    /// exception so expansion never regenerates it. Returns the id of the
    /// transaction carrying the edit.
    pub fn edit_single(
        ledger: &mut Ledger,
        id: Uuid,
        update: TransactionUpdate,
    ) -> ServiceResult<Uuid> {
        if update.amount <= 0.0 {
            return Err(ServiceError::Invalid("Amount must be positive".into()));
        }
        let original = ledger
            .transaction(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;

        match original.recurrence_rule_id {
            Some(rule_id) => {
                ledger
                    .exceptions
                    .push(RecurrenceException::new(rule_id, original.date));
                let _ = ledger.remove_transaction(id);
                let mut replacement = Transaction::new(
                    update.amount,
                    update.kind,
                    update.date,
                    update.category_id,
                    update.account_id,
                );
                replacement.note = update.note;
                Ok(ledger.add_transaction(replacement))
            }
            None => {
                let previous_account = original.account_id;
                if let Some(txn) = ledger.transaction_mut(id) {
                    txn.amount = update.amount;
                    txn.kind = update.kind;
                    txn.date = update.date;
                    txn.category_id = update.category_id;
                    txn.account_id = update.account_id;
                    txn.note = update.note;
                }
                ledger.recompute_balance(previous_account);
                ledger.recompute_balance(update.account_id);
                ledger.touch();
                Ok(id)
            }
        }
    }

    /// Edits this and all future occurrences by splitting the series at the
    /// edited instance's date: the current rule is closed the day before,
    /// and a new rule opens at that date with the revised values. Past
    /// instances are untouched. Returns the new rule's id.
    pub fn edit_future(
        ledger: &mut Ledger,
        id: Uuid,
        update: RecurrenceUpdate,
    ) -> ServiceResult<Uuid> {
        if update.amount <= 0.0 {
            return Err(ServiceError::Invalid("Amount must be positive".into()));
        }
        let txn = ledger
            .transaction(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        let rule_id = txn
            .recurrence_rule_id
            .ok_or_else(|| ServiceError::Invalid("Transaction is not recurring".into()))?;
        let split_date = txn.date;
        {
            let rule = ledger
                .rule_mut(rule_id)
                .ok_or_else(|| ServiceError::Invalid("Recurrence rule not found".into()))?;
            rule.end_date = Some(split_date - Duration::days(1));
        }

        let successor = RecurrenceRule {
            id: Uuid::new_v4(),
            frequency: update.frequency,
            start_date: split_date,
            end_date: None,
            amount: update.amount,
            kind: update.kind,
            category_id: update.category_id,
            account_id: update.account_id,
            note: update.note.clone(),
            base_day: split_date.day(),
        };
        let successor_id = ledger.add_rule(successor);

        // Slots the user already deleted on or after the split date stay
        // deleted: their exceptions move to the successor rule.
        for exception in ledger.exceptions.iter_mut() {
            if exception.rule_id == rule_id && exception.date >= split_date {
                exception.rule_id = successor_id;
            }
        }

        let previous_account = txn.account_id;
        if let Some(txn) = ledger.transaction_mut(id) {
            txn.amount = update.amount;
            txn.kind = update.kind;
            txn.category_id = update.category_id;
            txn.account_id = update.account_id;
            txn.note = update.note;
            txn.link_rule(successor_id);
        }
        ledger.recompute_balance(previous_account);
        ledger.recompute_balance(update.account_id);
        ledger.touch();
        tracing::debug!(%rule_id, %successor_id, %split_date, "split recurring series");
        Ok(successor_id)
    }

    /// Deletes one occurrence: the transaction is removed and an exception is
    /// recorded so the slot never comes back.
    pub fn delete_instance(ledger: &mut Ledger, id: Uuid) -> ServiceResult<()> {
        let txn = ledger
            .transaction(id)
            .cloned()
            .ok_or_else(|| ServiceError::Invalid("Transaction not found".into()))?;
        if let Some(rule_id) = txn.recurrence_rule_id {
            ledger
                .exceptions
                .push(RecurrenceException::new(rule_id, txn.date));
        }
        let _ = ledger.remove_transaction(id);
        Ok(())
    }

    /// Deletes a whole series: the rule, its exceptions, and every
    /// transaction referencing it, past and future. Returns the number of
    /// transactions removed.
    pub fn delete_series(ledger: &mut Ledger, rule_id: Uuid) -> ServiceResult<usize> {
        if ledger.rule(rule_id).is_none() {
            return Err(ServiceError::Invalid("Recurrence rule not found".into()));
        }
        ledger.rules.retain(|rule| rule.id != rule_id);
        ledger
            .exceptions
            .retain(|exception| exception.rule_id != rule_id);

        let affected: HashSet<Uuid> = ledger
            .transactions
            .iter()
            .filter(|txn| txn.recurrence_rule_id == Some(rule_id))
            .map(|txn| txn.account_id)
            .collect();
        let before = ledger.transactions.len();
        ledger
            .transactions
            .retain(|txn| txn.recurrence_rule_id != Some(rule_id));
        let removed = before - ledger.transactions.len();
        for account_id in affected {
            ledger.recompute_balance(account_id);
        }
        ledger.touch();
        tracing::debug!(%rule_id, removed, "deleted recurring series");
        Ok(removed)
    }

    fn rule_from_transaction(transaction: &Transaction, frequency: Frequency) -> RecurrenceRule {
        RecurrenceRule::new(
            frequency,
            transaction.date,
            transaction.amount,
            transaction.kind,
            transaction.category_id,
            transaction.account_id,
            transaction.note.clone(),
        )
    }
}
