//! Record Store Port
//!
//! The accounting engine never persists anything itself. Policies,
//! contacts, invoices and payments are read and written through the
//! [`RecordStore`] trait, which can be backed by the in-memory adapter in
//! this crate or by a database adapter in the embedding application.
//!
//! # Transactions
//!
//! Each method is one unit of work. In particular
//! [`RecordStore::replace_invoices`] writes the policy record, retires the
//! old batch and stores the new one atomically: if it fails, the policy and
//! its previous invoices are left untouched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_billing::ports::{RecordStore, InvoiceQuery};
//!
//! let active = store.find_invoices(policy.id, &InvoiceQuery::active())?;
//! let overdue = store.find_invoices(
//!     policy.id,
//!     &InvoiceQuery::active().cancelling_on_or_before(as_of),
//! )?;
//! ```

use chrono::NaiveDate;

use core_kernel::{ContactId, DomainPort, PolicyId, PortError};

use crate::contact::Contact;
use crate::invoice::Invoice;
use crate::payment::Payment;
use crate::policy::Policy;

/// Query parameters for finding invoices of a policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InvoiceQuery {
    /// Filter on the deleted flag; `None` returns both
    pub deleted: Option<bool>,
    /// Only invoices billed on or before this date
    pub billed_on_or_before: Option<NaiveDate>,
    /// Only invoices whose cancel date is on or before this date
    pub cancel_on_or_before: Option<NaiveDate>,
}

impl InvoiceQuery {
    /// Every invoice, including retired ones
    pub fn all() -> Self {
        Self::default()
    }

    /// Invoices that have not been retired
    pub fn active() -> Self {
        Self {
            deleted: Some(false),
            ..Default::default()
        }
    }

    /// Invoices retired by regeneration
    pub fn retired() -> Self {
        Self {
            deleted: Some(true),
            ..Default::default()
        }
    }

    /// Restricts to invoices billed on or before `date`
    pub fn billed_on_or_before(mut self, date: NaiveDate) -> Self {
        self.billed_on_or_before = Some(date);
        self
    }

    /// Restricts to invoices whose cancel date is on or before `date`
    pub fn cancelling_on_or_before(mut self, date: NaiveDate) -> Self {
        self.cancel_on_or_before = Some(date);
        self
    }

    /// Returns true if the invoice satisfies every filter
    pub fn matches(&self, invoice: &Invoice) -> bool {
        self.deleted.map_or(true, |d| invoice.is_deleted() == d)
            && self.billed_on_or_before.map_or(true, |d| invoice.bill_date() <= d)
            && self.cancel_on_or_before.map_or(true, |d| invoice.cancel_date() <= d)
    }
}

/// Query parameters for finding payments of a policy
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PaymentQuery {
    /// Only payments made on or before this date
    pub on_or_before: Option<NaiveDate>,
}

impl PaymentQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn on_or_before(date: NaiveDate) -> Self {
        Self {
            on_or_before: Some(date),
        }
    }

    pub fn matches(&self, payment: &Payment) -> bool {
        self.on_or_before.map_or(true, |d| payment.transaction_date() <= d)
    }
}

/// The persistence port for the accounting engine
///
/// Query methods return invoices ordered by bill date and payments ordered
/// by transaction date.
pub trait RecordStore: DomainPort {
    /// Retrieves a policy by ID, or `PortError::NotFound`
    fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError>;

    /// Inserts or updates a policy
    fn save_policy(&self, policy: &Policy) -> Result<(), PortError>;

    /// Retrieves a contact by ID, or `PortError::NotFound`
    fn get_contact(&self, id: ContactId) -> Result<Contact, PortError>;

    /// Inserts or updates a contact
    fn save_contact(&self, contact: &Contact) -> Result<(), PortError>;

    /// Finds the invoices of a policy matching the query
    fn find_invoices(
        &self,
        policy_id: PolicyId,
        query: &InvoiceQuery,
    ) -> Result<Vec<Invoice>, PortError>;

    /// Saves `policy`, retires every active invoice of it and stores
    /// `invoices` in their place, atomically
    ///
    /// The policy must already be stored; a schedule change passes the
    /// updated record so the change and its invoices land together.
    ///
    /// # Returns
    ///
    /// The number of invoices retired
    fn replace_invoices(
        &self,
        policy: &Policy,
        invoices: Vec<Invoice>,
    ) -> Result<usize, PortError>;

    /// Updates a stored invoice (deleted flag, amount due)
    fn update_invoice(&self, invoice: &Invoice) -> Result<(), PortError>;

    /// Finds the payments of a policy matching the query
    fn find_payments(
        &self,
        policy_id: PolicyId,
        query: &PaymentQuery,
    ) -> Result<Vec<Payment>, PortError>;

    /// Stores a new payment
    fn insert_payment(&self, payment: &Payment) -> Result<(), PortError>;
}

/// Convenience queries built on [`RecordStore`]
pub trait RecordStoreExt: RecordStore {
    /// Active invoices, ordered by bill date
    fn active_invoices(&self, policy_id: PolicyId) -> Result<Vec<Invoice>, PortError> {
        self.find_invoices(policy_id, &InvoiceQuery::active())
    }

    /// True if the policy has ever been invoiced, retired invoices included
    fn has_invoices(&self, policy_id: PolicyId) -> Result<bool, PortError> {
        Ok(!self.find_invoices(policy_id, &InvoiceQuery::all())?.is_empty())
    }
}

impl<T: RecordStore + ?Sized> RecordStoreExt for T {}
