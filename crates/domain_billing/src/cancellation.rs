//! Non-pay cancellation
//!
//! Two questions are answered over an [`AccountSnapshot`]:
//!
//! - **Pending cancellation**: is some invoice inside its grace period
//!   (after the due date, up to and including the cancel date) with money
//!   still owed as of its due date?
//! - **Cancellation decision**: has some invoice reached its cancel date
//!   with money still owed as of that date? Invoices are checked in bill
//!   date order and the first one found decides.
//!
//! Both are pure decisions; nothing is written back to the policy.

use chrono::NaiveDate;
use serde::Serialize;

use core_kernel::{InvoiceId, Money, MoneyError};

use crate::balance::AccountSnapshot;

/// Outcome of evaluating a policy for non-pay cancellation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum CancellationDecision {
    /// An invoice reached its cancel date unpaid
    ShouldCancel {
        /// First invoice, by bill date, that triggered cancellation
        invoice_id: InvoiceId,
        cancel_date: NaiveDate,
        /// Balance owed as of the cancel date
        balance: Money,
    },
    /// No invoice has reached its cancel date unpaid
    InGoodStanding,
}

impl CancellationDecision {
    pub fn should_cancel(&self) -> bool {
        matches!(self, CancellationDecision::ShouldCancel { .. })
    }
}

impl AccountSnapshot {
    /// Returns true if an invoice is in its grace period and the account
    /// was in arrears on that invoice's due date
    pub fn pending_cancellation_for_non_pay(&self, as_of: NaiveDate) -> Result<bool, MoneyError> {
        for invoice in self.invoices().iter().filter(|i| i.in_grace_period(as_of)) {
            if self.balance_as_of(invoice.due_date())?.is_positive() {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Decides whether the policy should be cancelled for non-payment
    pub fn cancellation_decision(&self, as_of: NaiveDate) -> Result<CancellationDecision, MoneyError> {
        for invoice in self.invoices().iter().filter(|i| i.cancel_date() <= as_of) {
            let balance = self.balance_as_of(invoice.cancel_date())?;
            if balance.is_positive() {
                return Ok(CancellationDecision::ShouldCancel {
                    invoice_id: invoice.id(),
                    cancel_date: invoice.cancel_date(),
                    balance,
                });
            }
        }
        Ok(CancellationDecision::InGoodStanding)
    }
}
