//! Property-Based Test Generators
//!
//! Proptest strategies for currencies, premiums, schedules, and effective
//! dates.

use chrono::NaiveDate;
use core_kernel::{Currency, Money};
use domain_billing::BillingSchedule;
use proptest::prelude::*;

/// Strategy for generating Currency values
pub fn currency_strategy() -> impl Strategy<Value = Currency> {
    prop_oneof![
        Just(Currency::USD),
        Just(Currency::EUR),
        Just(Currency::GBP),
        Just(Currency::CAD),
        Just(Currency::AUD),
        Just(Currency::JPY),
    ]
}

/// Strategy for generating billing schedules
pub fn schedule_strategy() -> impl Strategy<Value = BillingSchedule> {
    proptest::sample::select(BillingSchedule::ALL.to_vec())
}

/// Strategy for generating positive premiums in minor units, up to 10 million
pub fn premium_minor_strategy() -> impl Strategy<Value = i64> {
    1i64..1_000_000_000i64
}

/// Strategy for generating positive USD premiums
pub fn usd_premium_strategy() -> impl Strategy<Value = Money> {
    premium_minor_strategy().prop_map(|minor| Money::from_minor(minor, Currency::USD))
}

/// Strategy for generating positive premiums in any currency
pub fn premium_strategy() -> impl Strategy<Value = Money> {
    (premium_minor_strategy(), currency_strategy())
        .prop_map(|(minor, currency)| Money::from_minor(minor, currency))
}

/// Strategy for generating effective dates between 2000 and 2039
///
/// Day 31 of a shorter month falls back to that month's last day, so
/// month ends are well represented.
pub fn effective_date_strategy() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2040i32, 1u32..=12u32, 1u32..=31u32).prop_map(|(year, month, day)| {
        (1..=day)
            .rev()
            .find_map(|d| NaiveDate::from_ymd_opt(year, month, d))
            .expect("every month has a first day")
    })
}
