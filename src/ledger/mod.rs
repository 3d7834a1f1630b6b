//! Ledger domain models, the recurrence engine, and summary helpers.

pub mod account;
pub mod category;
pub mod expansion;
#[allow(clippy::module_inception)]
pub mod ledger;
pub mod period;
pub mod recurrence;
pub mod summary;
pub mod transaction;

pub use account::{Account, AccountKind};
pub use category::Category;
pub use expansion::expand_month;
pub use ledger::Ledger;
pub use period::{days_in_month, MonthWindow, Period, Quincena};
pub use recurrence::{Frequency, RecurrenceException, RecurrenceRule};
pub use summary::{filter_by_period, totals_of, Totals};
pub use transaction::{Transaction, TransactionKind};
