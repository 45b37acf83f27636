//! Error types for the report pipeline.
//!
//! One type per failure concern, each fatal to the run:
//!
//! - [`ReadError`] - input missing, unreadable, or not CSV
//! - [`SchemaError`] - required source columns absent from the header
//! - [`FormatError`] - a cell that should hold a timestamp does not
//! - [`WriteError`] - the destination rejected the report
//! - [`ReportError`] - top-level wrapper returned by the pipeline
//!
//! Conversion into [`ReportError`] is automatic via `From`, so `?` works
//! across stage boundaries.

use thiserror::Error;

// =============================================================================
// Read Errors
// =============================================================================

/// Errors while loading the input export.
#[derive(Debug, Error)]
pub enum ReadError {
    /// Failed to open or read the file.
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The content is not well-formed CSV.
    #[error("Invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A data row has more cells than the header.
    #[error("Line {line}: expected {expected} fields, saw {found}")]
    TooManyFields { line: u64, expected: usize, found: usize },

    /// The file has no header row.
    #[error("CSV input is empty (no header row)")]
    EmptyFile,

    /// The delimiter is not a single ASCII character.
    #[error("Delimiter must be a single ASCII character, got '{0}'")]
    InvalidDelimiter(char),
}

// =============================================================================
// Schema Errors
// =============================================================================

/// Required source columns are absent from the input header.
#[derive(Debug, Error)]
#[error("Missing required column(s): {}", quoted(.missing))]
pub struct SchemaError {
    /// Every missing source column, in field-mapping order.
    pub missing: Vec<String>,
}

fn quoted(columns: &[String]) -> String {
    columns
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(", ")
}

// =============================================================================
// Format Errors
// =============================================================================

/// A cell could not be parsed as the type its column requires.
#[derive(Debug, Error)]
#[error("Issue {issue}: cannot parse {column} value '{value}' as a date-time")]
pub struct FormatError {
    /// Row key of the offending row.
    pub issue: String,
    /// Destination column name.
    pub column: String,
    /// Raw cell text.
    pub value: String,
}

// =============================================================================
// Write Errors
// =============================================================================

/// Errors while emitting the finished report.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The destination stream failed.
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV encoder failed.
    #[error("Failed to encode report: {0}")]
    Csv(#[from] csv::Error),
}

// =============================================================================
// Report Errors (top-level)
// =============================================================================

/// Top-level error returned by [`crate::transform::pipeline::build_report`] and the
/// binary.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("Format error: {0}")]
    Format(#[from] FormatError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),
}

/// Result type for pipeline operations.
pub type ReportResult<T> = Result<T, ReportError>;
