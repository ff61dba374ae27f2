//! Application configuration loaded from environment variables.

use std::env;
use std::path::PathBuf;

use crate::services::IdentityMode;
use crate::services::summary::SummaryOptions;

/// Default values for optional settings.
pub mod defaults {
    pub const MAX_PREVIOUS_REPORTS: usize = 10;
    pub const IDENTITY: &str = "name";
    pub const FLAKY_THRESHOLD: f64 = 0.0;
    pub const FAIL_THRESHOLD: f64 = 0.0;
    pub const TOP_N: usize = 10;
}

/// Application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Current CTRF report to enrich
    pub current_report: PathBuf,
    /// Directory holding previous reports (optional)
    pub history_dir: Option<PathBuf>,
    /// Where to write the enriched report (default: overwrite the current report)
    pub output_path: PathBuf,
    /// Newest previous reports to fold in
    pub max_previous_reports: usize,
    /// How tests are matched across reports
    pub identity: IdentityMode,
    /// Minimum flaky rate listed in the summary
    pub flaky_threshold: f64,
    /// Minimum fail rate listed in the summary
    pub fail_threshold: f64,
    /// Rows per summary ranking
    pub top_n: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TSI_CURRENT_REPORT`: Path to the current report - REQUIRED
    /// - `TSI_HISTORY_DIR`: Directory of previous reports (`*.json`)
    /// - `TSI_OUTPUT_PATH`: Output path (default: `TSI_CURRENT_REPORT`)
    /// - `TSI_MAX_PREVIOUS_REPORTS`: Newest history reports to use (default: 10)
    /// - `TSI_IDENTITY`: `name` or `suite-name` (default: name)
    /// - `TSI_FLAKY_THRESHOLD`: Minimum flaky rate in rankings (default: 0)
    /// - `TSI_FAIL_THRESHOLD`: Minimum fail rate in rankings (default: 0)
    /// - `TSI_TOP_N`: Rows per ranking (default: 10)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let current_report = lookup("TSI_CURRENT_REPORT")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .ok_or(ConfigError::MissingEnvVar("TSI_CURRENT_REPORT"))?;

        let history_dir = lookup("TSI_HISTORY_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let output_path = lookup("TSI_OUTPUT_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| current_report.clone());

        let max_previous_reports = lookup("TSI_MAX_PREVIOUS_REPORTS")
            .unwrap_or_else(|| defaults::MAX_PREVIOUS_REPORTS.to_string())
            .parse::<usize>()
            .map_err(|_| {
                ConfigError::InvalidValue("TSI_MAX_PREVIOUS_REPORTS must be a valid number")
            })?;

        let identity = IdentityMode::parse(
            &lookup("TSI_IDENTITY").unwrap_or_else(|| defaults::IDENTITY.to_string()),
        )
        .ok_or(ConfigError::InvalidValue(
            "TSI_IDENTITY must be 'name' or 'suite-name'",
        ))?;

        let flaky_threshold = parse_rate(
            lookup("TSI_FLAKY_THRESHOLD"),
            defaults::FLAKY_THRESHOLD,
            "TSI_FLAKY_THRESHOLD must be a number between 0 and 100",
        )?;

        let fail_threshold = parse_rate(
            lookup("TSI_FAIL_THRESHOLD"),
            defaults::FAIL_THRESHOLD,
            "TSI_FAIL_THRESHOLD must be a number between 0 and 100",
        )?;

        let top_n = lookup("TSI_TOP_N")
            .unwrap_or_else(|| defaults::TOP_N.to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue("TSI_TOP_N must be a valid number"))?;

        Ok(Config {
            current_report,
            history_dir,
            output_path,
            max_previous_reports,
            identity,
            flaky_threshold,
            fail_threshold,
            top_n,
        })
    }

    /// Summary rendering options derived from this configuration.
    pub fn summary_options(&self) -> SummaryOptions {
        SummaryOptions {
            flaky_threshold: self.flaky_threshold,
            fail_threshold: self.fail_threshold,
            top_n: self.top_n,
        }
    }
}

fn parse_rate(
    value: Option<String>,
    default: f64,
    message: &'static str,
) -> Result<f64, ConfigError> {
    let Some(raw) = value else {
        return Ok(default);
    };

    match raw.trim().parse::<f64>() {
        Ok(rate) if (0.0..=100.0).contains(&rate) => Ok(rate),
        _ => Err(ConfigError::InvalidValue(message)),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}
