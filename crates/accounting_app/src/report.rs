//! Per-policy account report

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::info;

use core_kernel::{Money, PolicyId};
use domain_billing::{BillingError, BillingSchedule, CancellationDecision, PolicyAccounting, RecordStore};

/// Account position of one policy as of a date
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyReport {
    pub policy_id: PolicyId,
    pub policy_name: String,
    /// Name of the named insured, if the policy has one on record
    pub named_insured: Option<String>,
    pub billing_schedule: BillingSchedule,
    pub as_of: NaiveDate,
    pub active_invoices: usize,
    pub balance: Money,
    pub pending_cancellation: bool,
    pub decision: CancellationDecision,
}

impl PolicyReport {
    /// Binds the engine to the policy and collects its position
    ///
    /// Binding generates invoices for a policy that has none yet.
    pub fn build(
        store: Arc<dyn RecordStore>,
        policy_id: PolicyId,
        as_of: NaiveDate,
    ) -> Result<Self, BillingError> {
        let accounting = PolicyAccounting::new(store.clone(), policy_id)?;
        let policy = accounting.policy();
        let named_insured = match policy.named_insured {
            Some(contact_id) => Some(store.get_contact(contact_id)?.name),
            None => None,
        };

        let report = Self {
            policy_id,
            policy_name: policy.name.clone(),
            named_insured,
            billing_schedule: policy.billing_schedule(),
            as_of,
            active_invoices: accounting.invoices()?.len(),
            balance: accounting.account_balance(as_of)?,
            pending_cancellation: accounting.pending_cancellation_for_non_pay(as_of)?,
            decision: accounting.evaluate_cancel(as_of)?,
        };

        info!(
            policy_id = %report.policy_id,
            policy = %report.policy_name,
            schedule = %report.billing_schedule,
            %as_of,
            balance = %report.balance,
            pending_cancellation = report.pending_cancellation,
            should_cancel = report.decision.should_cancel(),
            "Policy report"
        );

        Ok(report)
    }
}
