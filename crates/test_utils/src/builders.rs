//! Test Data Builders
//!
//! Builders with sensible defaults, so tests only spell out the fields
//! they care about. `TestPolicyBuilder::seed` goes one step further and
//! stores the policy and its contacts in a fresh in-memory record store.

use std::sync::Arc;

use chrono::NaiveDate;
use core_kernel::{Money, PolicyId};
use domain_billing::{
    BillingError, BillingSchedule, Contact, InMemoryRecordStore, Policy, PolicyAccounting,
    RecordStore,
};
use fake::faker::name::en::Name;
use fake::Fake;

use crate::fixtures::{DateFixtures, MoneyFixtures};

/// Builder for constructing test policies
pub struct TestPolicyBuilder {
    name: String,
    effective_date: NaiveDate,
    premium: Money,
    schedule: BillingSchedule,
    with_named_insured: bool,
}

impl Default for TestPolicyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestPolicyBuilder {
    /// Annual policy for $1200 effective 2015-01-01, with a named insured
    /// and an agent
    pub fn new() -> Self {
        Self {
            name: "Test Policy".to_string(),
            effective_date: DateFixtures::effective_date(),
            premium: MoneyFixtures::usd_1200(),
            schedule: BillingSchedule::Annual,
            with_named_insured: true,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_effective_date(mut self, date: NaiveDate) -> Self {
        self.effective_date = date;
        self
    }

    pub fn with_premium(mut self, premium: Money) -> Self {
        self.premium = premium;
        self
    }

    pub fn with_schedule(mut self, schedule: BillingSchedule) -> Self {
        self.schedule = schedule;
        self
    }

    /// Leaves the policy without a named insured
    pub fn without_named_insured(mut self) -> Self {
        self.with_named_insured = false;
        self
    }

    /// Builds the policy and the contacts it references
    pub fn build(self) -> (Policy, Vec<Contact>) {
        let mut policy = Policy::new(self.name, self.effective_date, self.premium)
            .with_billing_schedule(self.schedule);
        let mut contacts = Vec::new();

        if self.with_named_insured {
            let insured = Contact::named_insured(Name().fake::<String>());
            policy = policy.with_named_insured(insured.id);
            contacts.push(insured);
        }
        let agent = Contact::agent(Name().fake::<String>());
        policy = policy.with_agent(agent.id);
        contacts.push(agent);

        (policy, contacts)
    }

    /// Builds the policy and stores it, with its contacts, in a new
    /// in-memory record store
    pub fn seed(self) -> SeededPolicy {
        let (policy, contacts) = self.build();
        let store = Arc::new(InMemoryRecordStore::with_records(contacts, vec![policy.clone()]));

        SeededPolicy { store, policy }
    }
}

/// A policy stored in its own in-memory record store
pub struct SeededPolicy {
    pub store: Arc<InMemoryRecordStore>,
    pub policy: Policy,
}

impl SeededPolicy {
    pub fn policy_id(&self) -> PolicyId {
        self.policy.id
    }

    /// The store as the engine sees it
    pub fn record_store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    /// Binds an accounting engine to the seeded policy
    ///
    /// The first call generates the policy's invoices.
    pub fn accounting(&self) -> Result<PolicyAccounting, BillingError> {
        PolicyAccounting::new(self.record_store(), self.policy.id)
    }
}
