//! Pre-built Test Fixtures
//!
//! Ready-to-use dates and amounts. The dates follow the 2015
//! policy year used throughout the accounting scenarios.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use rust_decimal_macros::dec;

/// Shorthand for a calendar date
///
/// # Panics
///
/// Panics if the date does not exist
pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid fixture date {year}-{month}-{day}"))
}

/// Shorthand for a whole-dollar USD amount
pub fn usd(dollars: i64) -> Money {
    Money::from_major(dollars, Currency::USD)
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// Standard annual premium
    pub fn usd_1200() -> Money {
        usd(1200)
    }

    /// Premium that splits into thirds with a remainder
    pub fn usd_100() -> Money {
        Money::new(dec!(100.00), Currency::USD)
    }

    /// Creates a EUR amount for currency mismatch tests
    pub fn eur_100() -> Money {
        Money::new(dec!(100.00), Currency::EUR)
    }
}

/// Fixture for calendar test data
pub struct DateFixtures;

impl DateFixtures {
    /// Standard effective date (Jan 1, 2015)
    pub fn effective_date() -> NaiveDate {
        ymd(2015, 1, 1)
    }

    /// Due date of an invoice billed on the standard effective date
    pub fn first_due_date() -> NaiveDate {
        ymd(2015, 2, 1)
    }

    /// Cancel date of an invoice billed on the standard effective date
    pub fn first_cancel_date() -> NaiveDate {
        ymd(2015, 2, 15)
    }

    /// Effective date that exercises month-end clamping
    pub fn month_end() -> NaiveDate {
        ymd(2015, 1, 31)
    }
}
