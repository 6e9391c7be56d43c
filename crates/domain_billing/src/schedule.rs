//! Billing schedule table
//!
//! Maps each billing plan to its installment count. Installments are spread
//! evenly over the policy year, so the spacing between bill dates is
//! `12 / installment_count` months.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BillingError;

/// Billing plan for a policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BillingSchedule {
    /// One invoice for the full annual premium
    #[default]
    Annual,
    /// Two installments, six months apart
    #[serde(rename = "Two-Pay")]
    TwoPay,
    /// Three installments, four months apart
    #[serde(rename = "Semi-Annual")]
    SemiAnnual,
    /// Four installments, three months apart
    Quarterly,
    /// Twelve installments, one month apart
    Monthly,
}

impl BillingSchedule {
    /// Every supported schedule, in increasing installment count
    pub const ALL: [BillingSchedule; 5] = [
        BillingSchedule::Annual,
        BillingSchedule::TwoPay,
        BillingSchedule::SemiAnnual,
        BillingSchedule::Quarterly,
        BillingSchedule::Monthly,
    ];

    /// Returns the number of invoices generated per policy year
    pub fn installment_count(&self) -> u32 {
        match self {
            BillingSchedule::Annual => 1,
            BillingSchedule::TwoPay => 2,
            BillingSchedule::SemiAnnual => 3,
            BillingSchedule::Quarterly => 4,
            BillingSchedule::Monthly => 12,
        }
    }

    /// Returns the number of months between consecutive bill dates
    pub fn months_between_installments(&self) -> u32 {
        12 / self.installment_count()
    }

    /// Returns the display name used by the billing department
    pub fn name(&self) -> &'static str {
        match self {
            BillingSchedule::Annual => "Annual",
            BillingSchedule::TwoPay => "Two-Pay",
            BillingSchedule::SemiAnnual => "Semi-Annual",
            BillingSchedule::Quarterly => "Quarterly",
            BillingSchedule::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for BillingSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BillingSchedule {
    type Err = BillingError;

    /// Parses a schedule name; case-insensitive, `_` or space may stand in for `-`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .map(|c| if c == '_' || c == ' ' { '-' } else { c.to_ascii_lowercase() })
            .collect();

        match normalized.as_str() {
            "annual" => Ok(BillingSchedule::Annual),
            "two-pay" => Ok(BillingSchedule::TwoPay),
            "semi-annual" => Ok(BillingSchedule::SemiAnnual),
            "quarterly" => Ok(BillingSchedule::Quarterly),
            "monthly" => Ok(BillingSchedule::Monthly),
            _ => Err(BillingError::invalid_schedule(s)),
        }
    }
}
