//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! policy accounting test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built dates, amounts, and contacts
//! - `builders`: Builders for policies and seeded record stores
//! - `assertions`: Custom assertion helpers for money and invoices
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use assertions::*;
pub use generators::*;
