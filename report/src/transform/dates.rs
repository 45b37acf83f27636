//! Ticket creation timestamps → calendar dates.
//!
//! Jira's export format depends on the instance's locale settings, so a
//! fixed list of known layouts is tried in order. A user-supplied chrono
//! format, if any, is tried first. Values carrying a UTC offset are
//! truncated in that offset; nothing is converted between zones.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::error::FormatError;
use crate::models::IssueTable;

/// Output layout of the `Date` column.
pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f %:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M %z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    // Jira default, e.g. "15/Mar/23 9:30 AM"
    "%d/%b/%y %I:%M %p",
    "%d/%b/%Y %I:%M %p",
    "%d/%b/%y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%m/%d/%Y %I:%M %p",
    "%m/%d/%y %H:%M",
    "%m/%d/%y %I:%M %p",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%d/%b/%y", "%d/%b/%Y"];

fn parse_with(value: &str, format: &str) -> Option<NaiveDate> {
    DateTime::parse_from_str(value, format)
        .map(|dt| dt.date_naive())
        .or_else(|_| NaiveDateTime::parse_from_str(value, format).map(|dt| dt.date()))
        .or_else(|_| NaiveDate::parse_from_str(value, format))
        .ok()
}

/// Parse a creation timestamp and keep only its calendar date.
pub fn parse_created(raw: &str, custom_format: Option<&str>) -> Option<NaiveDate> {
    let value = raw.trim();
    if value.is_empty() {
        return None;
    }

    if let Some(date) = custom_format.and_then(|f| parse_with(value, f)) {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }

    OFFSET_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(value, f).ok().map(|dt| dt.date_naive()))
        .or_else(|| {
            NAIVE_FORMATS
                .iter()
                .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok().map(|dt| dt.date()))
        })
        .or_else(|| DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(value, f).ok()))
}

/// Rewrite every `Date` cell as `YYYY-MM-DD`.
///
/// Stops at the first value that cannot be parsed.
pub fn normalize_dates(table: &mut IssueTable, custom_format: Option<&str>) -> Result<(), FormatError> {
    for row in table.rows_mut() {
        let date = parse_created(&row.date, custom_format).ok_or_else(|| FormatError {
            issue: row.issue.clone(),
            column: "Date".to_string(),
            value: row.date.clone(),
        })?;
        row.date = date.format(DATE_OUTPUT_FORMAT).to_string();
    }
    Ok(())
}
