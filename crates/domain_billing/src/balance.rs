//! Account balance calculation
//!
//! The balance as of a date is the sum of every active invoice billed on or
//! before that date, minus every payment made on or before it. A negative
//! balance means the policyholder has paid ahead.

use chrono::NaiveDate;

use core_kernel::{Currency, Money, MoneyError};

use crate::invoice::Invoice;
use crate::payment::Payment;

/// Invoices and payments of one policy, loaded once for repeated
/// as-of queries
#[derive(Debug, Clone)]
pub struct AccountSnapshot {
    currency: Currency,
    invoices: Vec<Invoice>,
    payments: Vec<Payment>,
}

impl AccountSnapshot {
    /// Creates a snapshot; retired invoices are dropped and the rest are
    /// ordered by bill date
    pub fn new(currency: Currency, invoices: Vec<Invoice>, payments: Vec<Payment>) -> Self {
        let mut invoices: Vec<Invoice> = invoices.into_iter().filter(|i| !i.is_deleted()).collect();
        invoices.sort_by_key(|i| i.bill_date());

        Self {
            currency,
            invoices,
            payments,
        }
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Active invoices, ordered by bill date
    pub fn invoices(&self) -> &[Invoice] {
        &self.invoices
    }

    pub fn payments(&self) -> &[Payment] {
        &self.payments
    }

    /// Total billed on or before `as_of`
    pub fn billed_as_of(&self, as_of: NaiveDate) -> Result<Money, MoneyError> {
        let billed: Vec<Money> = self
            .invoices
            .iter()
            .filter(|i| i.bill_date() <= as_of)
            .map(|i| i.amount_due())
            .collect();

        Money::checked_sum(self.currency, &billed)
    }

    /// Total paid on or before `as_of`
    pub fn paid_as_of(&self, as_of: NaiveDate) -> Result<Money, MoneyError> {
        let paid: Vec<Money> = self
            .payments
            .iter()
            .filter(|p| p.transaction_date() <= as_of)
            .map(|p| p.amount_paid())
            .collect();

        Money::checked_sum(self.currency, &paid)
    }

    /// Amount owed as of `as_of`; negative if overpaid
    pub fn balance_as_of(&self, as_of: NaiveDate) -> Result<Money, MoneyError> {
        self.billed_as_of(as_of)?.checked_sub(&self.paid_as_of(as_of)?)
    }
}
