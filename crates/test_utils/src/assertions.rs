//! Custom Test Assertions
//!
//! Assertion helpers for money and invoices that give more meaningful
//! failure messages than `assert_eq!` on the raw structs.

use core_kernel::calendar::{add_days, add_months};
use core_kernel::Money;
use domain_billing::{Invoice, DUE_OFFSET_MONTHS, GRACE_PERIOD_DAYS};
use rust_decimal::Decimal;

/// Asserts that a Money value has the expected amount
pub fn assert_money_eq(actual: &Money, expected: Decimal) {
    assert_eq!(
        actual.amount(),
        expected,
        "Expected {} {}, got {}",
        actual.currency().symbol(),
        expected,
        actual
    );
}

/// Asserts that a Money value is zero
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "Expected zero money, got {}", money);
}

/// Asserts that a Money value is strictly positive
pub fn assert_money_positive(money: &Money) {
    assert!(money.is_positive(), "Expected positive money, got {}", money);
}

/// Asserts that invoice amounts sum exactly to the premium
///
/// # Panics
///
/// Panics on a currency mismatch or if the sum differs from `premium`
pub fn assert_invoices_sum_to(invoices: &[Invoice], premium: &Money) {
    let total: Decimal = invoices.iter().map(|i| i.amount_due().amount()).sum();
    assert!(
        invoices.iter().all(|i| i.amount_due().currency() == premium.currency()),
        "Invoice currency differs from premium currency {}",
        premium.currency()
    );
    assert_eq!(
        total,
        premium.amount(),
        "Invoices sum to {} but premium is {}",
        total,
        premium
    );
}

/// Asserts that due and cancel dates are derived from the bill date
pub fn assert_invoice_dates_derived(invoice: &Invoice) {
    let due = add_months(invoice.bill_date(), DUE_OFFSET_MONTHS).expect("due date in range");
    let cancel = add_days(due, GRACE_PERIOD_DAYS).expect("cancel date in range");

    assert_eq!(invoice.due_date(), due, "Due date of {} not derived from bill date", invoice.id());
    assert_eq!(
        invoice.cancel_date(),
        cancel,
        "Cancel date of {} not derived from due date",
        invoice.id()
    );
}

/// Asserts that invoices are in strictly increasing bill date order
pub fn assert_ordered_by_bill_date(invoices: &[Invoice]) {
    for pair in invoices.windows(2) {
        assert!(
            pair[0].bill_date() < pair[1].bill_date(),
            "Invoices out of order: {} then {}",
            pair[0].bill_date(),
            pair[1].bill_date()
        );
    }
}
