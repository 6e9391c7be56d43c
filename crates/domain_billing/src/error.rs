//! Billing domain errors

use thiserror::Error;

use core_kernel::{CalendarError, MoneyError, PortError};

/// Errors that can occur in the billing domain
#[derive(Debug, Error)]
pub enum BillingError {
    /// Billing schedule name is not one of the supported plans
    #[error("Invalid billing schedule: {0}")]
    InvalidSchedule(String),

    /// Policy id does not resolve to a stored policy
    #[error("Policy not found: {0}")]
    PolicyNotFound(String),

    /// Money arithmetic failed (e.g. currency mismatch)
    #[error("Money error: {0}")]
    Money(#[from] MoneyError),

    /// A derived bill, due, or cancel date fell outside the calendar
    #[error("Date out of range: {0}")]
    DateOutOfRange(#[from] CalendarError),

    /// The record store rejected or failed an operation
    #[error("Record store error: {0}")]
    Store(#[from] PortError),
}

impl BillingError {
    /// Creates an InvalidSchedule error
    pub fn invalid_schedule(name: impl Into<String>) -> Self {
        BillingError::InvalidSchedule(name.into())
    }

    /// Creates a PolicyNotFound error from any ID type
    pub fn policy_not_found(id: impl std::fmt::Display) -> Self {
        BillingError::PolicyNotFound(id.to_string())
    }
}
