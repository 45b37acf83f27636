//! Run configuration.
//!
//! Defaults come from the environment (after `.env` is loaded by the binary);
//! command-line flags override them.

use crate::logs::{LogFormat, LogSettings};

/// Explicit chrono format tried before the built-in timestamp formats
pub const ENV_DATE_FORMAT: &str = "RDS_REPORT_DATE_FORMAT";
/// `text` or `json`
pub const ENV_LOG_FORMAT: &str = "RDS_REPORT_LOG_FORMAT";
/// Any of `1`, `true`, `yes` silences progress logging
pub const ENV_QUIET: &str = "RDS_REPORT_QUIET";

/// Options for a report run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    /// Field delimiter of the input export
    pub delimiter: char,

    /// chrono format string for the `Created` column, if the export uses one
    /// the built-in list does not cover
    pub date_format: Option<String>,

    pub log_format: LogFormat,

    pub quiet: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            delimiter: ',',
            date_format: None,
            log_format: LogFormat::Text,
            quiet: false,
        }
    }
}

impl ReportOptions {
    /// Build options from environment variables, falling back to defaults.
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build options from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut options = Self::default();

        if let Some(format) = lookup(ENV_DATE_FORMAT).filter(|f| !f.trim().is_empty()) {
            options.date_format = Some(format);
        }
        if let Some(format) = lookup(ENV_LOG_FORMAT) {
            options.log_format = format
                .parse()
                .map_err(|e| format!("{}: {}", ENV_LOG_FORMAT, e))?;
        }
        if let Some(quiet) = lookup(ENV_QUIET) {
            options.quiet = parse_flag(&quiet);
        }

        Ok(options)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            format: self.log_format,
            quiet: self.quiet,
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
