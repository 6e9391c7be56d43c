//! Policy Accounting - Demo Report Binary
//!
//! Seeds the demo book into an in-memory store and reports each policy's
//! balance and cancellation position as of the configured date.
//!
//! # Usage
//!
//! ```bash
//! # Report as of today
//! cargo run --bin accounting-report
//!
//! # Report as of a fixed date, logging JSON
//! ACCOUNTING_REPORT_DATE=2015-03-01 ACCOUNTING_LOG_FORMAT=json cargo run --bin accounting-report
//! ```
//!
//! # Environment Variables
//!
//! * `ACCOUNTING_LOG_LEVEL` - Log level: trace, debug, info, warn, error (default: info)
//! * `ACCOUNTING_LOG_FORMAT` - `pretty` or `json` (default: pretty)
//! * `ACCOUNTING_CURRENCY` - Premium currency code (default: USD)
//! * `ACCOUNTING_REPORT_DATE` - As-of date, `YYYY-MM-DD` (default: today)

use anyhow::Context;

use accounting_app::telemetry::init_tracing;
use accounting_app::{AppConfig, DemoBook, PolicyReport};

fn main() -> anyhow::Result<()> {
    // Load .env file if present (useful for local development)
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid ACCOUNTING_* configuration")?;
    init_tracing(&config);

    let as_of = config.report_date();
    tracing::info!(%as_of, currency = %config.currency, "Starting accounting report");

    let book = DemoBook::seed(config.currency).context("failed to seed demo book")?;

    let reports = book
        .policy_ids()
        .map(|id| PolicyReport::build(book.store(), id, as_of))
        .collect::<Result<Vec<_>, _>>()
        .context("failed to build policy reports")?;

    println!("{}", serde_json::to_string_pretty(&reports)?);
    Ok(())
}
