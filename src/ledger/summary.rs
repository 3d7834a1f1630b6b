//! Pure filtering and aggregation over transaction collections.

use serde::{Deserialize, Serialize};

use super::period::{MonthWindow, Period};
use super::transaction::{Transaction, TransactionKind};

/// Selects the transactions falling in the given month (1-12) and year, and
/// when a quincena is requested, also inside that half-month. Output order is
/// not a contract; callers re-sort for display.
pub fn filter_by_period<'a>(
    transactions: &'a [Transaction],
    year: i32,
    month: u32,
    period: Period,
) -> Vec<&'a Transaction> {
    let window = MonthWindow::of(year, month);
    transactions
        .iter()
        .filter(|txn| window.contains(txn.date))
        .filter(|txn| match period {
            Period::Quincena(quincena) => quincena.contains(txn.date),
            Period::Month => true,
        })
        .collect()
}

/// Income, expense, and net balance over a transaction set.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expense: f64,
    pub balance: f64,
}

/// Sums the provided transactions into [`Totals`].
pub fn totals_of<'a>(transactions: impl IntoIterator<Item = &'a Transaction>) -> Totals {
    let mut totals = Totals::default();
    for txn in transactions {
        match txn.kind {
            TransactionKind::Income => totals.income += txn.amount,
            TransactionKind::Expense => totals.expense += txn.amount,
        }
    }
    totals.balance = totals.income - totals.expense;
    totals
}
