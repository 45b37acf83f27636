//! Progress logging on standard error.
//!
//! Standard output carries the report itself, so every log line is written to
//! standard error, either as prefixed text or as one JSON object per line.

use once_cell::sync::{Lazy, OnceCell};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::str::FromStr;

/// Log level for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// How log entries are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!("unknown log format '{}' (expected text or json)", other)),
        }
    }
}

/// A single log entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogEntry {
    pub level: LogLevel,
    pub message: String,
    /// Optional indentation level (for nested logs)
    #[serde(default)]
    pub indent: u8,
}

impl LogEntry {
    pub fn info(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Info, message: message.into(), indent: 0 }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Success, message: message.into(), indent: 0 }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Warning, message: message.into(), indent: 0 }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { level: LogLevel::Error, message: message.into(), indent: 0 }
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    /// Render the entry as a single line (no trailing newline).
    pub fn render(&self, format: LogFormat) -> String {
        match format {
            LogFormat::Text => {
                let prefix = match self.level {
                    LogLevel::Info => "   ",
                    LogLevel::Success => "   ✓",
                    LogLevel::Warning => "   ⚠️",
                    LogLevel::Error => "   ❌",
                };
                let indent = "   ".repeat(self.indent as usize);
                format!("{}{} {}", indent, prefix, self.message)
            }
            LogFormat::Json => serde_json::to_string(self)
                .unwrap_or_else(|_| format!("{{\"level\":\"error\",\"message\":{:?}}}", self.message)),
        }
    }
}

/// Logger settings, fixed once at startup
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSettings {
    pub format: LogFormat,
    /// Suppress everything below [`LogLevel::Error`]
    pub quiet: bool,
}

static SETTINGS: OnceCell<LogSettings> = OnceCell::new();

/// Global logger
pub static LOGGER: Lazy<Logger> = Lazy::new(|| Logger::new(SETTINGS.get().copied().unwrap_or_default()));

/// Install logger settings. Only the first call has any effect.
pub fn init(settings: LogSettings) -> bool {
    SETTINGS.set(settings).is_ok()
}

/// Writes log entries to standard error
pub struct Logger {
    settings: LogSettings,
}

impl Logger {
    pub fn new(settings: LogSettings) -> Self {
        Self { settings }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        !self.settings.quiet || level == LogLevel::Error
    }

    pub fn log(&self, entry: LogEntry) {
        if !self.enabled(entry.level) {
            return;
        }
        let line = entry.render(self.settings.format);
        // A closed stderr must not abort report generation
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }
}

/// Convenient logging functions
pub fn log_info(msg: impl Into<String>) {
    LOGGER.log(LogEntry::info(msg));
}

pub fn log_success(msg: impl Into<String>) {
    LOGGER.log(LogEntry::success(msg));
}

pub fn log_warning(msg: impl Into<String>) {
    LOGGER.log(LogEntry::warning(msg));
}

pub fn log_error(msg: impl Into<String>) {
    LOGGER.log(LogEntry::error(msg));
}

pub fn log_info_indent(msg: impl Into<String>, indent: u8) {
    LOGGER.log(LogEntry::info(msg).with_indent(indent));
}
