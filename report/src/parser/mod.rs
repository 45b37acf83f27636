//! Loading the Jira CSV export.
//!
//! Bytes are decoded (with encoding detection), parsed with the `csv` crate,
//! and materialized as an [`InputTable`] of text cells. The header is then
//! checked against the field mapping so a missing column fails before any
//! transformation starts.

use std::path::Path;

use crate::error::{ReadError, ReportResult};
use crate::logs::{log_info, log_success};
use crate::transform::mapping::FieldMapping;

/// The export as read: header names plus one text cell per column per row.
#[derive(Debug, Clone, PartialEq)]
pub struct InputTable {
    /// Column headers, duplicates preserved
    pub headers: Vec<String>,
    /// Data rows, each exactly `headers.len()` cells long
    pub rows: Vec<Vec<String>>,
    /// Encoding the bytes were decoded from
    pub encoding: String,
}

impl InputTable {
    /// Position of the first column with this exact name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Detect the encoding of raw bytes.
///
/// Valid UTF-8 always wins; otherwise chardet's guess is normalized.
pub fn detect_encoding(bytes: &[u8]) -> String {
    if std::str::from_utf8(bytes).is_ok() {
        return "utf-8".to_string();
    }

    let charset = chardet::detect(bytes).0;
    match charset.to_lowercase().as_str() {
        "ascii" | "utf-8" | "utf8" => "utf-8".to_string(),
        "iso-8859-1" | "iso-8859-15" | "latin-1" | "latin1" => "iso-8859-1".to_string(),
        "windows-1252" | "cp1252" => "windows-1252".to_string(),
        "" => "windows-1252".to_string(),
        other => other.to_string(),
    }
}

/// Decode bytes using the given encoding label, dropping a leading BOM.
pub fn decode_content(bytes: &[u8], encoding: &str) -> String {
    let decoded = match encoding.to_lowercase().as_str() {
        "utf-8" | "utf8" | "ascii" => String::from_utf8_lossy(bytes).into_owned(),
        // Jira on Windows writes cp1252, which is a superset of latin-1's printable range
        "iso-8859-1" | "latin-1" | "latin1" | "windows-1252" | "cp1252" => {
            encoding_rs::WINDOWS_1252.decode(bytes).0.into_owned()
        }
        label => match encoding_rs::Encoding::for_label(label.as_bytes()) {
            Some(enc) => enc.decode(bytes).0.into_owned(),
            None => String::from_utf8_lossy(bytes).into_owned(),
        },
    };

    match decoded.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => decoded,
    }
}

fn delimiter_byte(delimiter: char) -> Result<u8, ReadError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(ReadError::InvalidDelimiter(delimiter))
    }
}

/// Parse decoded CSV text into an [`InputTable`].
///
/// Short rows are padded with empty cells so every row lines up with the
/// header. A row with more cells than the header is rejected: its values
/// can no longer be matched to columns.
pub fn parse_str(content: &str, delimiter: char, encoding: impl Into<String>) -> Result<InputTable, ReadError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter_byte(delimiter)?)
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(ReadError::EmptyFile);
    }

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        if record.len() > headers.len() {
            return Err(ReadError::TooManyFields {
                line: record.position().map_or(0, |p| p.line()),
                expected: headers.len(),
                found: record.len(),
            });
        }
        let mut cells: Vec<String> = record.iter().map(str::to_string).collect();
        cells.resize(headers.len(), String::new());
        rows.push(cells);
    }

    Ok(InputTable {
        headers,
        rows,
        encoding: encoding.into(),
    })
}

/// Parse raw bytes with encoding detection.
pub fn parse_bytes(bytes: &[u8], delimiter: char) -> Result<InputTable, ReadError> {
    let encoding = detect_encoding(bytes);
    let content = decode_content(bytes, &encoding);
    parse_str(&content, delimiter, encoding)
}

/// Read and parse a CSV file.
pub fn parse_file<P: AsRef<Path>>(path: P, delimiter: char) -> Result<InputTable, ReadError> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|source| ReadError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_bytes(&bytes, delimiter)
}

/// Load step: parse the export and require every mapped source column.
pub fn load<P: AsRef<Path>>(path: P, delimiter: char, mapping: &FieldMapping) -> ReportResult<InputTable> {
    log_info(format!("📖 Reading {}", path.as_ref().display()));
    let table = parse_file(path, delimiter)?;
    check_schema(table, mapping)
}

/// Load step over in-memory bytes.
pub fn load_bytes(bytes: &[u8], delimiter: char, mapping: &FieldMapping) -> ReportResult<InputTable> {
    let table = parse_bytes(bytes, delimiter)?;
    check_schema(table, mapping)
}

fn check_schema(table: InputTable, mapping: &FieldMapping) -> ReportResult<InputTable> {
    log_success(format!("Encoding: {}", table.encoding));
    mapping.require_columns(&table.headers)?;
    log_success(format!("Read {} rows, {} columns", table.len(), table.headers.len()));
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use std::io::Write;

    const HEADER: &str = "Issue key,Created,Issue Type,Custom field (Requestor),Custom field (Depositor Name),Custom field (Position),Custom field (Affiliation),Description,Custom field (Dataset Name)";

    #[test]
    fn test_simple_csv() {
        let table = parse_str("name,age\nAlice,30\nBob,25", ',', "utf-8").unwrap();

        assert_eq!(table.headers, vec!["name", "age"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0], vec!["Alice", "30"]);
        assert_eq!(table.rows[1], vec!["Bob", "25"]);
    }

    #[test]
    fn test_quoted_fields_keep_commas_and_newlines() {
        let csv = "a,b\n\"Hello, World\",\"line one\nline two\"\n\"say \"\"hi\"\"\",x";
        let table = parse_str(csv, ',', "utf-8").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[0][0], "Hello, World");
        assert_eq!(table.rows[0][1], "line one\nline two");
        assert_eq!(table.rows[1][0], "say \"hi\"");
    }

    #[test]
    fn test_short_rows_padded() {
        let table = parse_str("a,b,c\n1\n1,2,3", ',', "utf-8").unwrap();

        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn test_long_row_rejected_with_line_number() {
        let err = parse_str("a,b,c\n1,2,3\n1,2,3,4,5", ',', "utf-8").unwrap_err();

        match err {
            ReadError::TooManyFields { line, expected, found } => {
                assert_eq!(line, 3);
                assert_eq!(expected, 3);
                assert_eq!(found, 5);
            }
            other => panic!("expected too many fields, got {other}"),
        }
    }

    #[test]
    fn test_stray_comma_in_export_is_read_error() {
        let csv = format!("{}\nRDS-1,2023-03-15 09:30,Consultation,Jane,,Fac,Bio,desc,,EXTRA,MORE", HEADER);
        let err = load_bytes(csv.as_bytes(), ',', &FieldMapping::standard()).unwrap_err();
        assert!(matches!(err, ReportError::Read(ReadError::TooManyFields { found: 11, .. })));
    }

    #[test]
    fn test_duplicate_headers_first_wins() {
        let table = parse_str("Watchers,Summary,Watchers\nann,s,bob", ',', "utf-8").unwrap();
        assert_eq!(table.column_index("Watchers"), Some(0));
        assert_eq!(table.column_index("Summary"), Some(1));
        assert_eq!(table.column_index("Nope"), None);
    }

    #[test]
    fn test_semicolon_delimiter() {
        let table = parse_str("a;b\n1;2", ';', "utf-8").unwrap();
        assert_eq!(table.rows[0], vec!["1", "2"]);
    }

    #[test]
    fn test_non_ascii_delimiter_rejected() {
        let err = parse_str("a,b", '§', "utf-8").unwrap_err();
        assert!(matches!(err, ReadError::InvalidDelimiter('§')));
    }

    #[test]
    fn test_empty_csv_error() {
        let err = parse_str("", ',', "utf-8").unwrap_err();
        assert!(matches!(err, ReadError::EmptyFile));
    }

    #[test]
    fn test_bom_stripped() {
        let bytes = b"\xEF\xBB\xBFIssue key,Created\nRDS-1,2023-01-01";
        let table = parse_bytes(bytes, ',').unwrap();
        assert_eq!(table.headers[0], "Issue key");
        assert_eq!(table.encoding, "utf-8");
    }

    #[test]
    fn test_windows_1252_decoding() {
        // "Société" in cp1252
        let bytes: &[u8] = &[0x53, 0x6F, 0x63, 0x69, 0xE9, 0x74, 0xE9];
        assert_eq!(decode_content(bytes, "windows-1252"), "Société");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = parse_file("/definitely/not/here.csv", ',').unwrap_err();
        assert!(matches!(err, ReadError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.csv"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{},Summary", HEADER).unwrap();
        writeln!(file, "RDS-1,2023-03-15 09:30,Consultation,Jane Doe,,Faculty,Biology,Need help,,Stats").unwrap();

        let table = load(file.path(), ',', &FieldMapping::standard()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.headers.len(), 10);
    }

    #[test]
    fn test_load_reports_missing_columns() {
        let header = HEADER.replace(",Custom field (Position)", "");
        let csv = format!("{}\nRDS-1,2023-03-15,Consultation,Jane,,Bio,desc,", header);

        let err = load_bytes(csv.as_bytes(), ',', &FieldMapping::standard()).unwrap_err();
        match err {
            ReportError::Schema(schema) => {
                assert_eq!(schema.missing, vec!["Custom field (Position)".to_string()]);
            }
            other => panic!("expected schema error, got {other}"),
        }
    }
}
