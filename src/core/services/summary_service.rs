use crate::ledger::{filter_by_period, totals_of, Ledger, Period, Totals, Transaction};

/// Read-side composition of the period filter and totals aggregator.
pub struct SummaryService;

impl SummaryService {
    /// Transactions for the given month (1-12) and period selector, sorted
    /// descending by date for display lists.
    pub fn period_transactions(
        ledger: &Ledger,
        year: i32,
        month: u32,
        period: Period,
    ) -> Vec<&Transaction> {
        let mut selected = filter_by_period(&ledger.transactions, year, month, period);
        selected.sort_by(|a, b| b.date.cmp(&a.date));
        selected
    }

    /// Income, expense, and balance over the selected period.
    pub fn period_totals(ledger: &Ledger, year: i32, month: u32, period: Period) -> Totals {
        totals_of(
            filter_by_period(&ledger.transactions, year, month, period)
                .into_iter(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{Quincena, TransactionKind};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn ledger_with_entries() -> Ledger {
        let mut ledger = Ledger::new("Summary");
        let category_id = Uuid::new_v4();
        let account_id = Uuid::new_v4();
        for (kind, amount, day) in [
            (TransactionKind::Income, 100.0, 5),
            (TransactionKind::Expense, 40.0, 16),
            (TransactionKind::Income, 25.0, 28),
        ] {
            ledger.add_transaction(Transaction::new(
                amount,
                kind,
                date(2024, 2, day),
                category_id,
                account_id,
            ));
        }
        ledger
    }

    #[test]
    fn period_totals_respect_the_selector() {
        let ledger = ledger_with_entries();
        let month = SummaryService::period_totals(&ledger, 2024, 2, Period::Month);
        assert_eq!(month.income, 125.0);
        assert_eq!(month.expense, 40.0);
        assert_eq!(month.balance, 85.0);

        let q1 =
            SummaryService::period_totals(&ledger, 2024, 2, Period::Quincena(Quincena::Q1));
        assert_eq!(q1.income, 100.0);
        assert_eq!(q1.expense, 0.0);
    }

    #[test]
    fn listings_are_sorted_descending_by_date() {
        let ledger = ledger_with_entries();
        let listed = SummaryService::period_transactions(&ledger, 2024, 2, Period::Month);
        assert_eq!(listed.len(), 3);
        assert!(listed.windows(2).all(|pair| pair[0].date >= pair[1].date));
    }
}
