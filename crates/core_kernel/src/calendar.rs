//! Calendar arithmetic for billing dates
//!
//! Month offsets follow calendar months and clamp to the end of the target
//! month: Jan 31 plus one month is Feb 28 (or 29 in a leap year).

use chrono::{Days, Months, NaiveDate, Utc};
use thiserror::Error;

/// Errors related to calendar arithmetic
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Date out of range: {date} + {offset}")]
    OutOfRange {
        date: NaiveDate,
        offset: String,
    },
}

/// Adds whole calendar months to a date
pub fn add_months(date: NaiveDate, months: u32) -> Result<NaiveDate, CalendarError> {
    date.checked_add_months(Months::new(months))
        .ok_or_else(|| CalendarError::OutOfRange {
            date,
            offset: format!("{} months", months),
        })
}

/// Adds days to a date
pub fn add_days(date: NaiveDate, days: u64) -> Result<NaiveDate, CalendarError> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| CalendarError::OutOfRange {
            date,
            offset: format!("{} days", days),
        })
}

/// Today's date in UTC, the default cursor for as-of queries
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}
