//! Premium invoices
//!
//! An invoice is one installment of a policy's annual premium. Its due and
//! cancel dates are always derived from the bill date:
//!
//! - due date: bill date + 1 month
//! - cancel date: due date + 14 days
//!
//! Invoices are never removed. Regeneration retires them by setting the
//! `deleted` flag so the earlier billing history stays auditable.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::calendar::{add_days, add_months};
use core_kernel::{CalendarError, InvoiceId, Money, PolicyId};

/// Months between the bill date and the due date
pub const DUE_OFFSET_MONTHS: u32 = 1;

/// Days of grace between the due date and the cancel date
pub const GRACE_PERIOD_DAYS: u64 = 14;

/// An installment invoice for a policy
///
/// Deserialization rejects records whose due or cancel date is not derived
/// from the bill date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "InvoiceRecord")]
pub struct Invoice {
    id: InvoiceId,
    policy_id: PolicyId,
    bill_date: NaiveDate,
    due_date: NaiveDate,
    cancel_date: NaiveDate,
    amount_due: Money,
    deleted: bool,
}

/// Stored form of an [`Invoice`], checked on the way in
#[derive(Deserialize)]
struct InvoiceRecord {
    id: InvoiceId,
    policy_id: PolicyId,
    bill_date: NaiveDate,
    due_date: NaiveDate,
    cancel_date: NaiveDate,
    amount_due: Money,
    deleted: bool,
}

impl TryFrom<InvoiceRecord> for Invoice {
    type Error = String;

    fn try_from(record: InvoiceRecord) -> Result<Self, Self::Error> {
        let derived = Invoice::new(record.policy_id, record.bill_date, record.amount_due)
            .map_err(|e| e.to_string())?;

        if derived.due_date != record.due_date || derived.cancel_date != record.cancel_date {
            return Err(format!(
                "invoice {} dates do not follow bill date {}: due {}, cancel {}",
                record.id, record.bill_date, record.due_date, record.cancel_date
            ));
        }

        Ok(Self {
            id: record.id,
            deleted: record.deleted,
            ..derived
        })
    }
}

impl Invoice {
    /// Creates an active invoice billed on `bill_date`
    ///
    /// # Errors
    ///
    /// Returns error if the derived due or cancel date is outside the calendar
    pub fn new(
        policy_id: PolicyId,
        bill_date: NaiveDate,
        amount_due: Money,
    ) -> Result<Self, CalendarError> {
        let due_date = add_months(bill_date, DUE_OFFSET_MONTHS)?;
        let cancel_date = add_days(due_date, GRACE_PERIOD_DAYS)?;

        Ok(Self {
            id: InvoiceId::new_v7(),
            policy_id,
            bill_date,
            due_date,
            cancel_date,
            amount_due,
            deleted: false,
        })
    }

    pub fn id(&self) -> InvoiceId {
        self.id
    }

    pub fn policy_id(&self) -> PolicyId {
        self.policy_id
    }

    pub fn bill_date(&self) -> NaiveDate {
        self.bill_date
    }

    pub fn due_date(&self) -> NaiveDate {
        self.due_date
    }

    pub fn cancel_date(&self) -> NaiveDate {
        self.cancel_date
    }

    pub fn amount_due(&self) -> Money {
        self.amount_due
    }

    /// Returns true once the invoice has been retired by regeneration
    pub fn is_deleted(&self) -> bool {
        self.deleted
    }

    /// Retires the invoice; it stays on record but no longer counts
    pub fn mark_deleted(&mut self) {
        self.deleted = true;
    }

    /// Returns true if `date` falls after the due date, up to and including
    /// the cancel date
    pub fn in_grace_period(&self, date: NaiveDate) -> bool {
        self.due_date < date && date <= self.cancel_date
    }
}
