//! # RDS Report - yearly researcher interactions from a Jira export
//!
//! Reads the CSV export of the "RDS Interactions Last Year" Jira filter and
//! writes the normalized report used for UCOP reporting.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ Jira export │────▶│   Parser    │────▶│  Transform  │────▶│ Report CSV  │
//! │    (CSV)    │     │  (+schema)  │     │ (row rules) │     │  (stdout)   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use rds_report::{build_report, write_report, ReportOptions};
//!
//! let rows = build_report("jira-output.csv", &ReportOptions::default())?;
//! write_report(&rows, std::io::stdout().lock())?;
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types, one per failure concern
//! - [`config`] - Run options from environment and flags
//! - [`logs`] - Progress logging on standard error
//! - [`models`] - Typed rows
//! - [`parser`] - CSV loading with encoding detection
//! - [`transform`] - Mapping, dates, rules, and pipeline
//! - [`writer`] - Report serialization

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Input
pub mod parser;

// Transformation
pub mod transform;

// Output
pub mod writer;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::ReportOptions;

pub use error::{FormatError, ReadError, ReportError, ReportResult, SchemaError, WriteError};

pub use models::{IssueTable, OutputRow, ProjectedRow, CURATION};

pub use parser::{load, load_bytes, InputTable};

pub use transform::{
    build_report,
    build_report_from_bytes,
    coalesce_requestor,
    normalize_dates,
    project_and_rename,
    run_report,
    set_row_key,
    substitute_description_for_curation,
    transform_table,
    FieldMapping,
    FIELD_MAPPING,
};

pub use writer::{render_csv, write_report};
