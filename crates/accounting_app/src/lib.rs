//! Application layer for the policy accounting engine
//!
//! Wires the billing domain to an in-memory record store and reports on a
//! small demo book of policies.
//!
//! # Example
//!
//! ```rust,ignore
//! use accounting_app::{config::AppConfig, report::PolicyReport, seed::DemoBook};
//!
//! let config = AppConfig::from_env()?;
//! let book = DemoBook::seed(config.currency)?;
//!
//! for policy_id in book.policy_ids() {
//!     let report = PolicyReport::build(book.store(), policy_id, config.report_date())?;
//! }
//! ```

pub mod config;
pub mod report;
pub mod seed;
pub mod telemetry;

pub use config::{AppConfig, LogFormat};
pub use report::PolicyReport;
pub use seed::DemoBook;
