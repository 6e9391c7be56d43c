//! Payment recording
//!
//! Payments are immutable once recorded. They are not allocated to
//! individual invoices; the balance calculation nets them against the
//! invoices billed by the same date.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ContactId, Money, PaymentId, PolicyId};

/// A payment received against a policy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    id: PaymentId,
    policy_id: PolicyId,
    contact_id: Option<ContactId>,
    amount_paid: Money,
    transaction_date: NaiveDate,
}

impl Payment {
    /// Creates a new payment
    ///
    /// # Arguments
    ///
    /// * `policy_id` - Policy being paid
    /// * `contact_id` - Payer, if known
    /// * `amount_paid` - Amount received; sign is not checked
    /// * `transaction_date` - Date the money was received
    pub fn new(
        policy_id: PolicyId,
        contact_id: Option<ContactId>,
        amount_paid: Money,
        transaction_date: NaiveDate,
    ) -> Self {
        Self {
            id: PaymentId::new_v7(),
            policy_id,
            contact_id,
            amount_paid,
            transaction_date,
        }
    }

    pub fn id(&self) -> PaymentId {
        self.id
    }

    pub fn policy_id(&self) -> PolicyId {
        self.policy_id
    }

    pub fn contact_id(&self) -> Option<ContactId> {
        self.contact_id
    }

    pub fn amount_paid(&self) -> Money {
        self.amount_paid
    }

    pub fn transaction_date(&self) -> NaiveDate {
        self.transaction_date
    }
}

/// Request for recording a payment through the accounting engine
///
/// Unset fields fall back to the engine's defaults: the policy's named
/// insured as payer and today's date.
#[derive(Debug, Clone)]
pub struct PaymentRequest {
    /// Amount received
    pub amount: Money,
    /// Payer; defaults to the named insured
    pub contact_id: Option<ContactId>,
    /// Transaction date; defaults to today
    pub date: Option<NaiveDate>,
}

impl PaymentRequest {
    pub fn new(amount: Money) -> Self {
        Self {
            amount,
            contact_id: None,
            date: None,
        }
    }

    /// Sets the paying contact
    pub fn from_contact(mut self, contact_id: ContactId) -> Self {
        self.contact_id = Some(contact_id);
        self
    }

    /// Sets the transaction date
    pub fn on(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }
}
