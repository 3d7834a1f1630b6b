//! Recurrence expansion: computes the rule-generated transactions missing
//! for one target month.

use std::collections::HashSet;

use chrono::NaiveDate;
use uuid::Uuid;

use super::period::{days_in_month, MonthWindow, Quincena};
use super::recurrence::{Frequency, RecurrenceException, RecurrenceRule};
use super::transaction::Transaction;

/// Computes the transactions that must be synthesized for `year`/`month`
/// (1-12) given the rules, the instances already materialized, and the
/// per-instance deletions.
///
/// Pure function: inputs are never mutated and nothing is persisted; callers
/// merge the result into the transaction store exactly once. Feeding the
/// output back through `existing` yields an empty result, so the engine is
/// safe to invoke on every month navigation or rule change.
pub fn expand_month(
    rules: &[RecurrenceRule],
    existing: &[Transaction],
    year: i32,
    month: u32,
    exceptions: &[RecurrenceException],
) -> Vec<Transaction> {
    let window = MonthWindow::of(year, month);
    let materialized: HashSet<(Uuid, NaiveDate)> = existing
        .iter()
        .filter_map(|txn| txn.recurrence_rule_id.map(|rule_id| (rule_id, txn.date)))
        .collect();
    let suppressed: HashSet<(Uuid, NaiveDate)> = exceptions
        .iter()
        .map(|exception| (exception.rule_id, exception.date))
        .collect();

    let mut generated = Vec::new();
    for rule in rules {
        // Month-level activity window: not started yet, or already ended.
        if rule.start_date > window.end {
            continue;
        }
        if rule.end_date.is_some_and(|end| end < window.start) {
            continue;
        }

        let candidate = candidate_date(rule, year, month);

        // Day-level bounds catch rules starting or ending mid-month.
        if !rule.covers(candidate) {
            continue;
        }
        if materialized.contains(&(rule.id, candidate)) {
            continue;
        }
        if suppressed.contains(&(rule.id, candidate)) {
            continue;
        }

        generated.push(rule.materialize(candidate));
    }

    generated
}

/// Resolves the single day a rule lands on in the target month: the anchor
/// day clamped to the month's length, then forced into the rule's quincena
/// for biweekly rules.
fn candidate_date(rule: &RecurrenceRule, year: i32, month: u32) -> NaiveDate {
    let days = days_in_month(year, month);
    let mut day = rule.base_day.min(days);
    if let Frequency::Biweekly(quincena) = rule.frequency {
        match quincena {
            Quincena::Q1 if day > 15 => day = 15,
            Quincena::Q2 if day <= 15 => day = (day + 15).min(days),
            _ => {}
        }
    }
    NaiveDate::from_ymd_opt(year, month, day).expect("clamped day is valid")
}
