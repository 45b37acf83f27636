//! Row types flowing through the pipeline.
//!
//! - [`ProjectedRow`] - the nine renamed columns, before normalization
//! - [`IssueTable`] - projected rows keyed by `Issue`
//! - [`OutputRow`] - the seven reported columns

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Issue type whose description is replaced by its dataset name.
pub const CURATION: &str = "Curation";

/// A row after projection and renaming.
///
/// `depositor` and `dataset` only feed the normalization rules and are
/// dropped by [`IssueTable::finalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectedRow {
    pub issue: String,
    pub date: String,
    pub kind: String,
    pub requestor: String,
    pub depositor: String,
    pub position: String,
    pub affiliation: String,
    pub description: String,
    pub dataset: String,
}

impl ProjectedRow {
    /// Column names in projection order.
    pub const COLUMNS: [&'static str; 9] = [
        "Issue",
        "Date",
        "Type",
        "Requestor",
        "Depositor",
        "Position",
        "Affiliation",
        "Description",
        "Dataset",
    ];

    /// Build a row from cells given in [`ProjectedRow::COLUMNS`] order.
    pub fn from_cells(cells: [String; 9]) -> Self {
        let [issue, date, kind, requestor, depositor, position, affiliation, description, dataset] = cells;
        Self {
            issue,
            date,
            kind,
            requestor,
            depositor,
            position,
            affiliation,
            description,
            dataset,
        }
    }

    pub fn is_curation(&self) -> bool {
        self.kind == CURATION
    }
}

/// Projected rows with `Issue` designated as the row key.
///
/// Keys are not required to be unique; duplicates are kept in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueTable {
    rows: Vec<ProjectedRow>,
}

impl IssueTable {
    pub fn new(rows: Vec<ProjectedRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[ProjectedRow] {
        &self.rows
    }

    pub fn rows_mut(&mut self) -> &mut [ProjectedRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row keys in row order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.rows.iter().map(|r| r.issue.as_str())
    }

    /// Keys appearing on more than one row, with their occurrence count.
    pub fn duplicate_keys(&self) -> Vec<(String, usize)> {
        let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
        for key in self.keys() {
            *counts.entry(key).or_default() += 1;
        }
        counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(k, n)| (k.to_string(), n))
            .collect()
    }

    /// Drop the intermediate columns, producing the reported rows.
    pub fn finalize(self) -> Vec<OutputRow> {
        self.rows.into_iter().map(OutputRow::from).collect()
    }
}

/// A reported row. Field order is the output column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "Issue")]
    pub issue: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Type")]
    pub kind: String,
    #[serde(rename = "Requestor")]
    pub requestor: String,
    #[serde(rename = "Position")]
    pub position: String,
    #[serde(rename = "Affiliation")]
    pub affiliation: String,
    #[serde(rename = "Description")]
    pub description: String,
}

impl OutputRow {
    /// Output header, `Issue` first.
    pub const COLUMNS: [&'static str; 7] = [
        "Issue",
        "Date",
        "Type",
        "Requestor",
        "Position",
        "Affiliation",
        "Description",
    ];
}

impl From<ProjectedRow> for OutputRow {
    fn from(row: ProjectedRow) -> Self {
        Self {
            issue: row.issue,
            date: row.date,
            kind: row.kind,
            requestor: row.requestor,
            position: row.position,
            affiliation: row.affiliation,
            description: row.description,
        }
    }
}
