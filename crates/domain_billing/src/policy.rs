//! Policy records as seen by the accounting engine
//!
//! Only the fields that drive billing live here. Invoices are stored
//! separately and looked up by `policy_id`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use core_kernel::{ContactId, Money, PolicyId};

use crate::schedule::BillingSchedule;

/// An insurance policy under accounting
///
/// The effective date is fixed at creation. The billing schedule can only
/// be changed through the accounting engine, which regenerates invoices
/// alongside the change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Policy {
    /// Unique identifier
    pub id: PolicyId,
    /// Policy name or number
    pub name: String,
    effective_date: NaiveDate,
    /// Premium for the full policy year
    pub annual_premium: Money,
    billing_schedule: BillingSchedule,
    /// Default payer for payments recorded without a contact
    pub named_insured: Option<ContactId>,
    /// Selling agent
    pub agent: Option<ContactId>,
}

impl Policy {
    /// Creates a new policy on the Annual schedule
    ///
    /// # Arguments
    ///
    /// * `name` - Policy name
    /// * `effective_date` - First day of cover; the first bill date
    /// * `annual_premium` - Premium for the policy year
    pub fn new(name: impl Into<String>, effective_date: NaiveDate, annual_premium: Money) -> Self {
        Self {
            id: PolicyId::new_v7(),
            name: name.into(),
            effective_date,
            annual_premium,
            billing_schedule: BillingSchedule::default(),
            named_insured: None,
            agent: None,
        }
    }

    /// Sets the initial billing schedule
    pub fn with_billing_schedule(mut self, schedule: BillingSchedule) -> Self {
        self.billing_schedule = schedule;
        self
    }

    /// Sets the named insured
    pub fn with_named_insured(mut self, contact_id: ContactId) -> Self {
        self.named_insured = Some(contact_id);
        self
    }

    /// Sets the agent
    pub fn with_agent(mut self, contact_id: ContactId) -> Self {
        self.agent = Some(contact_id);
        self
    }

    pub fn effective_date(&self) -> NaiveDate {
        self.effective_date
    }

    pub fn billing_schedule(&self) -> BillingSchedule {
        self.billing_schedule
    }

    pub(crate) fn set_billing_schedule(&mut self, schedule: BillingSchedule) {
        self.billing_schedule = schedule;
    }
}
