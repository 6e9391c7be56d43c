//! Core Kernel - Foundational types for policy accounting
//!
//! This crate provides the building blocks shared by the accounting crates:
//! - Money types with precise decimal arithmetic and installment splitting
//! - Calendar month arithmetic for bill, due, and cancel dates
//! - Strongly-typed identifiers for policies, invoices, payments, contacts
//! - Port error types for record store adapters

pub mod money;
pub mod calendar;
pub mod identifiers;
pub mod ports;

pub use money::{Money, Currency, MoneyError};
pub use calendar::CalendarError;
pub use identifiers::{PolicyId, InvoiceId, PaymentId, ContactId};
pub use ports::{PortError, DomainPort};
