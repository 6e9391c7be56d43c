//! Invoice generation
//!
//! Builds the invoice batch for a policy year from the policy's billing
//! schedule. Installment `i` (0-based) is billed `i * 12 / n` months after
//! the effective date, always offset from the effective date rather than
//! from the previous bill date so month-end clamping never drifts.
//!
//! Amounts come from [`Money::split_installments`]: equal shares rounded to
//! the currency's minor unit, with the last installment absorbing the
//! remainder so the batch sums to the annual premium exactly.
//!
//! [`Money::split_installments`]: core_kernel::Money::split_installments

use core_kernel::calendar::add_months;

use crate::error::BillingError;
use crate::invoice::Invoice;
use crate::policy::Policy;

/// Plans invoice batches; persistence is left to the caller
pub struct InvoiceGenerator;

impl InvoiceGenerator {
    /// Builds the invoices for one policy year, ordered by bill date
    ///
    /// # Errors
    ///
    /// - `Money` if the premium cannot be split
    /// - `DateOutOfRange` if a derived date leaves the calendar
    pub fn build(policy: &Policy) -> Result<Vec<Invoice>, BillingError> {
        let schedule = policy.billing_schedule();
        let step = schedule.months_between_installments();
        let amounts = policy
            .annual_premium
            .split_installments(schedule.installment_count())?;

        amounts
            .into_iter()
            .zip(0u32..)
            .map(|(amount, i)| -> Result<Invoice, BillingError> {
                let bill_date = add_months(policy.effective_date(), i * step)?;
                Ok(Invoice::new(policy.id, bill_date, amount)?)
            })
            .collect()
    }
}
