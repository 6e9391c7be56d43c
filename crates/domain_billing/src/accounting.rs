//! Policy accounting engine
//!
//! `PolicyAccounting` is bound to one policy and one record store. It
//! generates invoices, records payments, reports balances, evaluates
//! non-pay cancellation, and switches billing schedules.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut accounting = PolicyAccounting::new(store.clone(), policy_id)?;
//!
//! accounting.make_payment(PaymentRequest::new(premium_share).on(bill_date))?;
//! let owed = accounting.account_balance(bill_date)?;
//!
//! accounting.change_billing_schedule(BillingSchedule::Monthly)?;
//! ```

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, info, warn};

use core_kernel::calendar::today;
use core_kernel::{ContactId, Currency, Money, MoneyError, PolicyId, PortError};

use crate::balance::AccountSnapshot;
use crate::cancellation::CancellationDecision;
use crate::error::BillingError;
use crate::generator::InvoiceGenerator;
use crate::invoice::Invoice;
use crate::payment::{Payment, PaymentRequest};
use crate::policy::Policy;
use crate::ports::{InvoiceQuery, PaymentQuery, RecordStore, RecordStoreExt};
use crate::schedule::BillingSchedule;

/// Accounting operations for a single policy
pub struct PolicyAccounting {
    store: Arc<dyn RecordStore>,
    policy: Policy,
}

impl PolicyAccounting {
    /// Binds the engine to a stored policy
    ///
    /// A policy that has never been invoiced gets its first invoice batch
    /// here.
    ///
    /// # Errors
    ///
    /// - `PolicyNotFound` if the id does not resolve
    /// - `Store` if the record store fails
    pub fn new(store: Arc<dyn RecordStore>, policy_id: PolicyId) -> Result<Self, BillingError> {
        let policy = store.get_policy(policy_id).map_err(|e| match e {
            PortError::NotFound { .. } => BillingError::policy_not_found(policy_id),
            other => BillingError::Store(other),
        })?;

        let accounting = Self { store, policy };

        if !accounting.store.has_invoices(policy_id)? {
            accounting.make_invoices()?;
        }

        Ok(accounting)
    }

    /// The policy as of the last engine operation
    pub fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Retires the current invoices and generates a fresh batch for the
    /// policy's billing schedule
    ///
    /// # Returns
    ///
    /// The new invoices, ordered by bill date
    pub fn make_invoices(&self) -> Result<Vec<Invoice>, BillingError> {
        let invoices = InvoiceGenerator::build(&self.policy)?;
        Self::store_batch(self.store.as_ref(), &self.policy, invoices)
    }

    /// Balance owed as of `as_of`: active invoices billed on or before the
    /// date, less payments made on or before it
    pub fn account_balance(&self, as_of: NaiveDate) -> Result<Money, BillingError> {
        let invoices = self.store.find_invoices(
            self.policy.id,
            &InvoiceQuery::active().billed_on_or_before(as_of),
        )?;
        let payments = self
            .store
            .find_payments(self.policy.id, &PaymentQuery::on_or_before(as_of))?;

        let balance = AccountSnapshot::new(self.currency(), invoices, payments).balance_as_of(as_of)?;
        debug!(policy_id = %self.policy.id, %as_of, %balance, "Account balance computed");

        Ok(balance)
    }

    /// Balance owed as of today
    pub fn current_balance(&self) -> Result<Money, BillingError> {
        self.account_balance(today())
    }

    /// Records a payment against the policy
    ///
    /// The payer defaults to the policy's named insured and the date to
    /// today. The amount is not validated beyond its currency.
    ///
    /// # Errors
    ///
    /// - `Money` if the payment currency differs from the premium currency
    /// - `Store` if the record store rejects the payment
    pub fn make_payment(&self, request: PaymentRequest) -> Result<Payment, BillingError> {
        if request.amount.currency() != self.currency() {
            return Err(MoneyError::CurrencyMismatch(
                request.amount.currency().to_string(),
                self.currency().to_string(),
            )
            .into());
        }

        let contact_id = request.contact_id.or_else(|| self.default_payer());
        let payment = Payment::new(
            self.policy.id,
            contact_id,
            request.amount,
            request.date.unwrap_or_else(today),
        );

        self.store.insert_payment(&payment)?;
        info!(
            policy_id = %self.policy.id,
            payment_id = %payment.id(),
            amount = %payment.amount_paid(),
            date = %payment.transaction_date(),
            "Payment recorded"
        );

        Ok(payment)
    }

    /// True if an invoice is past due but not yet past its cancel date,
    /// and the account was in arrears on that invoice's due date
    pub fn pending_cancellation_for_non_pay(&self, as_of: NaiveDate) -> Result<bool, BillingError> {
        let pending = self.snapshot()?.pending_cancellation_for_non_pay(as_of)?;
        debug!(policy_id = %self.policy.id, %as_of, pending, "Pending cancellation evaluated");
        Ok(pending)
    }

    /// Pending-cancellation state as of today
    pub fn pending_cancellation_today(&self) -> Result<bool, BillingError> {
        self.pending_cancellation_for_non_pay(today())
    }

    /// Decides whether the policy should be cancelled for non-payment
    ///
    /// Nothing is persisted; the caller acts on the decision.
    pub fn evaluate_cancel(&self, as_of: NaiveDate) -> Result<CancellationDecision, BillingError> {
        let cancellable = self.store.find_invoices(
            self.policy.id,
            &InvoiceQuery::active().cancelling_on_or_before(as_of),
        )?;

        // Balances at each cancel date need every invoice billed by then,
        // not only the cancellable ones.
        let decision = if cancellable.is_empty() {
            CancellationDecision::InGoodStanding
        } else {
            self.snapshot()?.cancellation_decision(as_of)?
        };

        match &decision {
            CancellationDecision::ShouldCancel { invoice_id, cancel_date, balance } => warn!(
                policy_id = %self.policy.id,
                %invoice_id,
                %cancel_date,
                %balance,
                "Policy should be cancelled for non-payment"
            ),
            CancellationDecision::InGoodStanding => info!(
                policy_id = %self.policy.id,
                %as_of,
                "Policy should not be cancelled"
            ),
        }

        Ok(decision)
    }

    /// Decides cancellation as of today
    pub fn evaluate_cancel_today(&self) -> Result<CancellationDecision, BillingError> {
        self.evaluate_cancel(today())
    }

    /// Moves the policy to a new billing schedule and regenerates its
    /// invoices
    ///
    /// Payments already recorded are not reallocated; they keep netting
    /// against whatever invoices are billed by their date.
    pub fn change_billing_schedule(
        &mut self,
        schedule: BillingSchedule,
    ) -> Result<Vec<Invoice>, BillingError> {
        let mut updated = self.policy.clone();
        updated.set_billing_schedule(schedule);

        let invoices = InvoiceGenerator::build(&updated)?;
        let invoices = Self::store_batch(self.store.as_ref(), &updated, invoices)?;

        info!(
            policy_id = %self.policy.id,
            from = %self.policy.billing_schedule(),
            to = %schedule,
            "Billing schedule changed"
        );
        self.policy = updated;

        Ok(invoices)
    }

    /// Like [`change_billing_schedule`](Self::change_billing_schedule),
    /// parsing the schedule from its name
    ///
    /// # Errors
    ///
    /// `InvalidSchedule` if the name is not recognised; nothing changes
    pub fn change_billing_schedule_named(&mut self, name: &str) -> Result<Vec<Invoice>, BillingError> {
        let schedule = name.parse::<BillingSchedule>().map_err(|e| {
            warn!(policy_id = %self.policy.id, schedule = name, "Rejected unknown billing schedule");
            e
        })?;
        self.change_billing_schedule(schedule)
    }

    /// Active invoices, ordered by bill date
    pub fn invoices(&self) -> Result<Vec<Invoice>, BillingError> {
        Ok(self.store.active_invoices(self.policy.id)?)
    }

    /// Every invoice ever generated for the policy, retired ones included
    pub fn invoice_history(&self) -> Result<Vec<Invoice>, BillingError> {
        Ok(self.store.find_invoices(self.policy.id, &InvoiceQuery::all())?)
    }

    /// Payments recorded against the policy, ordered by date
    pub fn payments(&self) -> Result<Vec<Payment>, BillingError> {
        Ok(self.store.find_payments(self.policy.id, &PaymentQuery::all())?)
    }

    /// Loads the active invoices and all payments
    pub fn snapshot(&self) -> Result<AccountSnapshot, BillingError> {
        Ok(AccountSnapshot::new(
            self.currency(),
            self.store.active_invoices(self.policy.id)?,
            self.store.find_payments(self.policy.id, &PaymentQuery::all())?,
        ))
    }

    fn currency(&self) -> Currency {
        self.policy.annual_premium.currency()
    }

    /// Payer used when a payment names no contact
    fn default_payer(&self) -> Option<ContactId> {
        if self.policy.named_insured.is_none() {
            debug!(policy_id = %self.policy.id, "No named insured; payment recorded without contact");
        }
        self.policy.named_insured
    }

    /// Writes the policy and swaps in its new invoice batch in one store call
    fn store_batch(
        store: &dyn RecordStore,
        policy: &Policy,
        invoices: Vec<Invoice>,
    ) -> Result<Vec<Invoice>, BillingError> {
        let created = invoices.len();
        let retired = store.replace_invoices(policy, invoices.clone())?;

        info!(
            policy_id = %policy.id,
            schedule = %policy.billing_schedule(),
            retired,
            created,
            "Invoices generated"
        );

        Ok(invoices)
    }
}
