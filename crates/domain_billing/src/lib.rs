//! Billing Domain - Policy Accounting Engine
//!
//! This crate turns a policy's annual premium and billing schedule into a
//! dated series of installment invoices, and answers the accounting
//! questions asked of that series: what is owed on a given date, is the
//! policy drifting toward non-pay cancellation, should it be cancelled.
//!
//! # Billing Schedules
//!
//! | Schedule    | Installments | Months apart |
//! |-------------|--------------|--------------|
//! | Annual      | 1            | -            |
//! | Two-Pay     | 2            | 6            |
//! | Semi-Annual | 3            | 4            |
//! | Quarterly   | 4            | 3            |
//! | Monthly     | 12           | 1            |
//!
//! Each invoice is due one month after it is billed and becomes
//! cancellable fourteen days after that.
//!
//! # Invoice Lifecycle
//!
//! Invoices are generated in batches and never edited afterwards.
//! Changing the billing schedule retires the current batch (soft delete)
//! and generates a new one; retired invoices stay on record for audit but
//! no longer count toward the balance.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use chrono::NaiveDate;
//! use core_kernel::{Currency, Money};
//! use domain_billing::{BillingSchedule, InMemoryRecordStore, Policy, PolicyAccounting, RecordStore};
//! use rust_decimal_macros::dec;
//!
//! let effective = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
//! let policy = Policy::new("Policy Two", effective, Money::from_major(1200, Currency::USD))
//!     .with_billing_schedule(BillingSchedule::Quarterly);
//!
//! let store = Arc::new(InMemoryRecordStore::new());
//! store.save_policy(&policy).unwrap();
//!
//! let accounting = PolicyAccounting::new(store, policy.id).unwrap();
//! assert_eq!(accounting.account_balance(effective).unwrap().amount(), dec!(300));
//! ```

pub mod schedule;
pub mod policy;
pub mod contact;
pub mod invoice;
pub mod payment;
pub mod generator;
pub mod balance;
pub mod cancellation;
pub mod accounting;
pub mod ports;
pub mod adapters;
pub mod error;

pub use schedule::BillingSchedule;
pub use policy::Policy;
pub use contact::{Contact, ContactRole};
pub use invoice::{Invoice, DUE_OFFSET_MONTHS, GRACE_PERIOD_DAYS};
pub use payment::{Payment, PaymentRequest};
pub use generator::InvoiceGenerator;
pub use balance::AccountSnapshot;
pub use cancellation::CancellationDecision;
pub use accounting::PolicyAccounting;
pub use ports::{RecordStore, RecordStoreExt, InvoiceQuery, PaymentQuery};
pub use adapters::InMemoryRecordStore;
pub use error::BillingError;
