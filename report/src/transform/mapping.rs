//! Field mapping: which export columns are kept, and what they are renamed to.

use crate::error::SchemaError;
use crate::models::ProjectedRow;
use crate::parser::InputTable;

/// Source columns of the Jira export, paired with their report names, in
/// projection order.
pub const FIELD_MAPPING: [(&str, &str); 9] = [
    ("Issue key", "Issue"),
    ("Created", "Date"),
    ("Issue Type", "Type"),
    ("Custom field (Requestor)", "Requestor"),
    ("Custom field (Depositor Name)", "Depositor"),
    ("Custom field (Position)", "Position"),
    ("Custom field (Affiliation)", "Affiliation"),
    ("Description", "Description"),
    ("Custom field (Dataset Name)", "Dataset"),
];

/// An ordered (source, destination) column mapping.
///
/// Destinations line up positionally with [`ProjectedRow::COLUMNS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldMapping {
    pairs: [(&'static str, &'static str); 9],
}

impl FieldMapping {
    /// The mapping for the RDS interactions export.
    pub fn standard() -> Self {
        Self { pairs: FIELD_MAPPING }
    }

    pub fn sources(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(source, _)| *source)
    }

    pub fn destinations(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.pairs.iter().map(|(_, dest)| *dest)
    }

    /// Source columns absent from `headers`, in mapping order.
    pub fn missing_columns(&self, headers: &[String]) -> Vec<String> {
        self.sources()
            .filter(|source| !headers.iter().any(|h| h == source))
            .map(str::to_string)
            .collect()
    }

    /// Fail with every missing source column at once.
    pub fn require_columns(&self, headers: &[String]) -> Result<(), SchemaError> {
        let missing = self.missing_columns(headers);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(SchemaError { missing })
        }
    }

    fn source_indices(&self, table: &InputTable) -> Result<[usize; 9], SchemaError> {
        let mut indices = [0usize; 9];
        let mut missing = Vec::new();
        for (slot, source) in indices.iter_mut().zip(self.sources()) {
            match table.column_index(source) {
                Some(idx) => *slot = idx,
                None => missing.push(source.to_string()),
            }
        }
        if missing.is_empty() {
            Ok(indices)
        } else {
            Err(SchemaError { missing })
        }
    }
}

impl Default for FieldMapping {
    fn default() -> Self {
        Self::standard()
    }
}

/// Keep only the mapped columns, in mapping order, under their new names.
///
/// Row order is preserved. Every other column of the export is discarded.
pub fn project_and_rename(table: &InputTable, mapping: &FieldMapping) -> Result<Vec<ProjectedRow>, SchemaError> {
    let indices = mapping.source_indices(table)?;

    let rows = table
        .rows
        .iter()
        .map(|cells| {
            let pick = |i: usize| cells.get(indices[i]).cloned().unwrap_or_default();
            ProjectedRow::from_cells(std::array::from_fn(pick))
        })
        .collect();

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_str;

    #[test]
    fn test_destinations_match_projected_columns() {
        let mapping = FieldMapping::standard();
        let dests: Vec<&str> = mapping.destinations().collect();
        assert_eq!(dests, ProjectedRow::COLUMNS.to_vec());
    }

    #[test]
    fn test_missing_columns_in_mapping_order() {
        let headers: Vec<String> = ["Issue key", "Created", "Issue Type", "Description"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        let missing = FieldMapping::standard().missing_columns(&headers);

        assert_eq!(
            missing,
            vec![
                "Custom field (Requestor)",
                "Custom field (Depositor Name)",
                "Custom field (Position)",
                "Custom field (Affiliation)",
                "Custom field (Dataset Name)",
            ]
        );
    }

    #[test]
    fn test_column_names_are_case_sensitive() {
        let headers: Vec<String> = FIELD_MAPPING
            .iter()
            .map(|(s, _)| if *s == "Created" { "created".to_string() } else { s.to_string() })
            .collect();
        let err = FieldMapping::standard().require_columns(&headers).unwrap_err();
        assert_eq!(err.missing, vec!["Created"]);
    }

    #[test]
    fn test_project_reorders_and_discards() {
        // Source columns shuffled, with extras interleaved
        let csv = "Summary,Custom field (Dataset Name),Description,Issue key,Watchers,Created,\
Custom field (Affiliation),Issue Type,Custom field (Position),Custom field (Depositor Name),Custom field (Requestor)\n\
sum,Ocean,desc,RDS-7,ann,2023-01-02,Biology,Curation,Staff,John,Jane";
        let table = parse_str(csv, ',', "utf-8").unwrap();

        let rows = project_and_rename(&table, &FieldMapping::standard()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0],
            ProjectedRow {
                issue: "RDS-7".into(),
                date: "2023-01-02".into(),
                kind: "Curation".into(),
                requestor: "Jane".into(),
                depositor: "John".into(),
                position: "Staff".into(),
                affiliation: "Biology".into(),
                description: "desc".into(),
                dataset: "Ocean".into(),
            }
        );
    }

    #[test]
    fn test_project_missing_column_propagates() {
        let table = parse_str("Issue key,Created\nRDS-1,2023-01-01", ',', "utf-8").unwrap();
        let err = project_and_rename(&table, &FieldMapping::standard()).unwrap_err();
        assert_eq!(err.missing.len(), 7);
    }
}
