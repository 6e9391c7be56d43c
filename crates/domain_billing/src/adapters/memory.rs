//! In-memory implementation of the record store
//!
//! All tables sit behind a single `RwLock`, so every port call is atomic
//! with respect to every other.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use core_kernel::{ContactId, DomainPort, PolicyId, PortError};

use crate::contact::Contact;
use crate::invoice::Invoice;
use crate::payment::Payment;
use crate::policy::Policy;
use crate::ports::{InvoiceQuery, PaymentQuery, RecordStore};

#[derive(Debug, Default)]
struct Tables {
    policies: HashMap<PolicyId, Policy>,
    contacts: HashMap<ContactId, Contact>,
    invoices: Vec<Invoice>,
    payments: Vec<Payment>,
}

/// Process-local record store
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    tables: RwLock<Tables>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with contacts and policies
    pub fn with_records(contacts: Vec<Contact>, policies: Vec<Policy>) -> Self {
        let tables = Tables {
            contacts: contacts.into_iter().map(|c| (c.id, c)).collect(),
            policies: policies.into_iter().map(|p| (p.id, p)).collect(),
            ..Default::default()
        };

        Self {
            tables: RwLock::new(tables),
        }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>, PortError> {
        self.tables
            .read()
            .map_err(|_| PortError::internal("record store lock poisoned"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>, PortError> {
        self.tables
            .write()
            .map_err(|_| PortError::internal("record store lock poisoned"))
    }
}

impl DomainPort for InMemoryRecordStore {}

impl RecordStore for InMemoryRecordStore {
    fn get_policy(&self, id: PolicyId) -> Result<Policy, PortError> {
        self.read()?
            .policies
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Policy", id))
    }

    fn save_policy(&self, policy: &Policy) -> Result<(), PortError> {
        self.write()?.policies.insert(policy.id, policy.clone());
        Ok(())
    }

    fn get_contact(&self, id: ContactId) -> Result<Contact, PortError> {
        self.read()?
            .contacts
            .get(&id)
            .cloned()
            .ok_or_else(|| PortError::not_found("Contact", id))
    }

    fn save_contact(&self, contact: &Contact) -> Result<(), PortError> {
        self.write()?.contacts.insert(contact.id, contact.clone());
        Ok(())
    }

    fn find_invoices(
        &self,
        policy_id: PolicyId,
        query: &InvoiceQuery,
    ) -> Result<Vec<Invoice>, PortError> {
        let tables = self.read()?;
        let mut invoices: Vec<Invoice> = tables
            .invoices
            .iter()
            .filter(|i| i.policy_id() == policy_id && query.matches(i))
            .cloned()
            .collect();

        // Stable sort keeps insertion order among same-day invoices
        invoices.sort_by_key(|i| i.bill_date());
        Ok(invoices)
    }

    fn replace_invoices(
        &self,
        policy: &Policy,
        invoices: Vec<Invoice>,
    ) -> Result<usize, PortError> {
        let policy_id = policy.id;
        let mut tables = self.write()?;

        if !tables.policies.contains_key(&policy_id) {
            return Err(PortError::not_found("Policy", policy_id));
        }

        // Validate the whole batch before touching anything
        for invoice in &invoices {
            if invoice.policy_id() != policy_id {
                return Err(PortError::validation(format!(
                    "invoice {} belongs to {}, not {}",
                    invoice.id(),
                    invoice.policy_id(),
                    policy_id
                )));
            }
            if tables.invoices.iter().any(|i| i.id() == invoice.id()) {
                return Err(PortError::conflict(format!(
                    "invoice {} already stored",
                    invoice.id()
                )));
            }
        }

        let mut retired = 0;
        for invoice in tables
            .invoices
            .iter_mut()
            .filter(|i| i.policy_id() == policy_id && !i.is_deleted())
        {
            invoice.mark_deleted();
            retired += 1;
        }

        tables.invoices.extend(invoices);
        tables.policies.insert(policy_id, policy.clone());
        Ok(retired)
    }

    fn update_invoice(&self, invoice: &Invoice) -> Result<(), PortError> {
        let mut tables = self.write()?;
        let stored = tables
            .invoices
            .iter_mut()
            .find(|i| i.id() == invoice.id())
            .ok_or_else(|| PortError::not_found("Invoice", invoice.id()))?;

        *stored = invoice.clone();
        Ok(())
    }

    fn find_payments(
        &self,
        policy_id: PolicyId,
        query: &PaymentQuery,
    ) -> Result<Vec<Payment>, PortError> {
        let tables = self.read()?;
        let mut payments: Vec<Payment> = tables
            .payments
            .iter()
            .filter(|p| p.policy_id() == policy_id && query.matches(p))
            .cloned()
            .collect();

        payments.sort_by_key(|p| p.transaction_date());
        Ok(payments)
    }

    fn insert_payment(&self, payment: &Payment) -> Result<(), PortError> {
        let mut tables = self.write()?;

        if !tables.policies.contains_key(&payment.policy_id()) {
            return Err(PortError::not_found("Policy", payment.policy_id()));
        }
        if tables.payments.iter().any(|p| p.id() == payment.id()) {
            return Err(PortError::conflict(format!(
                "payment {} already stored",
                payment.id()
            )));
        }

        tables.payments.push(payment.clone());
        Ok(())
    }
}
