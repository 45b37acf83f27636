//! Report serialization.
//!
//! The report is rendered to memory first and handed to the sink in one
//! write, so a failure never leaves half a report behind.

use std::io::Write;

use crate::error::WriteError;
use crate::models::OutputRow;

/// Render rows as RFC 4180 CSV with the fixed header.
pub fn render_csv(rows: &[OutputRow]) -> Result<Vec<u8>, WriteError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    // Written explicitly so an empty report still carries its header
    writer.write_record(OutputRow::COLUMNS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer.into_inner().map_err(|e| WriteError::Io(e.into_error()))
}

/// Serialize step: render and write the whole report to `sink`.
pub fn write_report<W: Write>(rows: &[OutputRow], mut sink: W) -> Result<(), WriteError> {
    let bytes = render_csv(rows)?;
    sink.write_all(&bytes)?;
    sink.flush()?;
    Ok(())
}
