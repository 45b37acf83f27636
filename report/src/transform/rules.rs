//! Per-row normalization rules.

use crate::models::{IssueTable, ProjectedRow};

/// Designate `Issue` as the row key. Duplicate keys are kept.
pub fn set_row_key(rows: Vec<ProjectedRow>) -> IssueTable {
    IssueTable::new(rows)
}

/// Fill an empty `Requestor` from `Depositor`.
///
/// Curation tickets record the person as the depositor; every other type
/// records a requestor. Returns the number of rows filled.
pub fn coalesce_requestor(table: &mut IssueTable) -> usize {
    let mut filled = 0;
    for row in table.rows_mut() {
        if row.requestor.is_empty() && !row.depositor.is_empty() {
            row.requestor = row.depositor.clone();
            filled += 1;
        }
    }
    filled
}

/// For curation tickets, report the dataset name as the description.
///
/// Applies even when `Dataset` is empty. Returns the number of rows changed.
pub fn substitute_description_for_curation(table: &mut IssueTable) -> usize {
    let mut substituted = 0;
    for row in table.rows_mut().iter_mut().filter(|r| r.is_curation()) {
        row.description = row.dataset.clone();
        substituted += 1;
    }
    substituted
}
