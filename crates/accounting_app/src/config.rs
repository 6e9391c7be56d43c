//! Application configuration

use chrono::NaiveDate;
use serde::Deserialize;

use core_kernel::calendar::today;
use core_kernel::Currency;

/// Prefix of the environment variables read by [`AppConfig::from_env`]
pub const ENV_PREFIX: &str = "ACCOUNTING";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level or `EnvFilter` directive
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
    /// Currency of the demo book premiums
    pub currency: Currency,
    /// As-of date for the report; today when unset
    pub report_date: Option<NaiveDate>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            currency: Currency::USD,
            report_date: None,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `ACCOUNTING_*` environment variables
    pub fn from_env() -> Result<Self, config::ConfigError> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX))
    }

    /// Loads configuration from an environment source; unset keys keep
    /// their defaults
    pub fn load(source: config::Environment) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()
    }

    /// The report's as-of date
    pub fn report_date(&self) -> NaiveDate {
        self.report_date.unwrap_or_else(today)
    }
}
