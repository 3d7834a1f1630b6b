use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

/// A half-month pay period: Q1 covers days 1-15, Q2 day 16 through month end.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Quincena {
    Q1,
    Q2,
}

impl Quincena {
    /// Classifies a calendar day into its half-month period.
    pub fn of(date: NaiveDate) -> Quincena {
        if date.day() <= 15 {
            Quincena::Q1
        } else {
            Quincena::Q2
        }
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        Quincena::of(date) == self
    }
}

/// Selects which slice of a month a listing or summary covers.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Period {
    Quincena(Quincena),
    Month,
}

/// First and last calendar day of a single month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl MonthWindow {
    /// Builds the window for the given month (1-12), respecting leap years.
    pub fn of(year: i32, month: u32) -> MonthWindow {
        let start = NaiveDate::from_ymd_opt(year, month, 1).expect("valid calendar month");
        let end = NaiveDate::from_ymd_opt(year, month, days_in_month(year, month))
            .expect("valid calendar day");
        MonthWindow { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Number of days in the given month (1-12), respecting leap years.
pub fn days_in_month(year: i32, month: u32) -> u32 {
    let next_month = if month == 12 { 1 } else { month + 1 };
    let next_year = if month == 12 { year + 1 } else { year };
    let first_next =
        NaiveDate::from_ymd_opt(next_year, next_month, 1).expect("valid calendar month");
    (first_next - Duration::days(1)).day()
}
