//! Demo book of policies
//!
//! Six contacts and three policies, each bound to the accounting engine once
//! so its invoices exist, plus one early payment on Policy Two.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::info;

use core_kernel::{Currency, Money, PolicyId};
use domain_billing::{
    BillingError, BillingSchedule, Contact, InMemoryRecordStore, PaymentRequest, Policy,
    PolicyAccounting, RecordStore,
};

/// Seeded in-memory store and the policies in it
pub struct DemoBook {
    store: Arc<InMemoryRecordStore>,
    policies: Vec<Policy>,
}

impl DemoBook {
    /// Seeds a fresh store with premiums in `currency`
    pub fn seed(currency: Currency) -> Result<Self, BillingError> {
        let john_doe_agent = Contact::agent("John Doe");
        let john_doe_insured = Contact::named_insured("John Doe");
        let bob_smith = Contact::agent("Bob Smith");
        let anna_white = Contact::named_insured("Anna White");
        let joe_lee = Contact::agent("Joe Lee");
        let ryan_bucket = Contact::named_insured("Ryan Bucket");

        let policy_one = Policy::new("Policy One", date(2015, 1, 1), Money::from_major(365, currency))
            .with_billing_schedule(BillingSchedule::Annual)
            .with_named_insured(john_doe_insured.id)
            .with_agent(bob_smith.id);
        let policy_two = Policy::new("Policy Two", date(2015, 2, 1), Money::from_major(1600, currency))
            .with_billing_schedule(BillingSchedule::Quarterly)
            .with_named_insured(anna_white.id)
            .with_agent(joe_lee.id);
        let policy_three = Policy::new("Policy Three", date(2015, 1, 1), Money::from_major(1200, currency))
            .with_billing_schedule(BillingSchedule::Monthly)
            .with_named_insured(ryan_bucket.id)
            .with_agent(john_doe_agent.id);

        let policies = vec![policy_one, policy_two, policy_three];
        let store = Arc::new(InMemoryRecordStore::with_records(
            vec![john_doe_agent, john_doe_insured, bob_smith, anna_white.clone(), joe_lee, ryan_bucket],
            policies.clone(),
        ));

        let book = Self { store, policies };
        let engines = book
            .policy_ids()
            .map(|id| PolicyAccounting::new(book.store(), id))
            .collect::<Result<Vec<_>, _>>()?;

        engines[1].make_payment(
            PaymentRequest::new(Money::from_major(400, currency))
                .from_contact(anna_white.id)
                .on(date(2015, 2, 1)),
        )?;

        info!(policies = book.policies.len(), %currency, "Demo book seeded");
        Ok(book)
    }

    /// The store as the engine sees it
    pub fn store(&self) -> Arc<dyn RecordStore> {
        self.store.clone()
    }

    /// Policies as seeded, in insertion order
    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn policy_ids(&self) -> impl Iterator<Item = PolicyId> + '_ {
        self.policies.iter().map(|p| p.id)
    }
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("demo book dates are valid")
}
