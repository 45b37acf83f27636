//! The report pipeline, end to end.
//!
//! ```text
//! load → project_and_rename → set_row_key → normalize_dates
//!      → coalesce_requestor → substitute_description_for_curation
//!      → finalize → serialize
//! ```
//!
//! Each step runs over the whole table before the next one starts.
//!
//! # Example
//!
//! ```rust,ignore
//! use rds_report::{build_report, write_report, ReportOptions};
//!
//! let rows = build_report("jira-output.csv", &ReportOptions::default())?;
//! write_report(&rows, std::io::stdout().lock())?;
//! ```

use std::io::Write;
use std::path::Path;

use super::dates::normalize_dates;
use super::mapping::{project_and_rename, FieldMapping};
use super::rules::{coalesce_requestor, set_row_key, substitute_description_for_curation};
use crate::config::ReportOptions;
use crate::error::ReportResult;
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::OutputRow;
use crate::parser::{load, load_bytes, InputTable};
use crate::writer::write_report;

/// Build the report from a Jira export on disk.
pub fn build_report<P: AsRef<Path>>(path: P, options: &ReportOptions) -> ReportResult<Vec<OutputRow>> {
    let mapping = FieldMapping::standard();
    let table = load(path, options.delimiter, &mapping)?;
    transform_table(&table, &mapping, options)
}

/// Build the report from export bytes already in memory.
pub fn build_report_from_bytes(bytes: &[u8], options: &ReportOptions) -> ReportResult<Vec<OutputRow>> {
    let mapping = FieldMapping::standard();
    let table = load_bytes(bytes, options.delimiter, &mapping)?;
    transform_table(&table, &mapping, options)
}

/// Build the report and write it to `sink`.
///
/// Nothing reaches the sink unless every step before serialization
/// succeeded. Returns the number of rows written.
pub fn run_report<P: AsRef<Path>, W: Write>(input: P, options: &ReportOptions, sink: W) -> ReportResult<usize> {
    let rows = build_report(input, options)?;
    write_report(&rows, sink)?;
    Ok(rows.len())
}

/// Run every step after `load` over a loaded table.
pub fn transform_table(
    table: &InputTable,
    mapping: &FieldMapping,
    options: &ReportOptions,
) -> ReportResult<Vec<OutputRow>> {
    log_info("⚙️  Normalizing rows...");

    let projected = project_and_rename(table, mapping)?;

    let mut issues = set_row_key(projected);
    let duplicates = issues.duplicate_keys();
    if !duplicates.is_empty() {
        log_warning(format!("{} issue key(s) appear more than once; all rows kept", duplicates.len()));
        for (key, count) in &duplicates {
            log_info_indent(format!("{} ×{}", key, count), 1);
        }
    }

    normalize_dates(&mut issues, options.date_format.as_deref())?;

    let filled = coalesce_requestor(&mut issues);
    log_success(format!("Requestor taken from depositor on {} row(s)", filled));

    let substituted = substitute_description_for_curation(&mut issues);
    log_success(format!("Dataset name used as description on {} curation row(s)", substituted));

    let rows = issues.finalize();
    log_success(format!("Report ready: {} row(s)", rows.len()));
    Ok(rows)
}
