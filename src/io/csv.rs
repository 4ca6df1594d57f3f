//! CSV ingestion for tool output.
//!
//! The Eric Zimmerman tools emit UTF-8 (with BOM) on modern configurations
//! but Windows-1252 shows up in the wild, so decoding tries UTF-8 first and
//! falls back rather than failing the run on the first smart quote.

use std::io::Read;
use std::path::Path;

use tracing::debug;

use crate::core::source::SourceTable;
use crate::error::Result;

/// Read a file and convert to UTF-8 if needed.
fn read_file_as_utf8(path: &Path) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)?;

    // Try UTF-8 first; on failure, recover the buffer from the error and
    // fall back to Windows-1252 (common for Excel-touched CSVs).
    let text = match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => {
            let bytes = e.into_bytes();
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(&bytes);
            decoded.into_owned()
        }
    };
    Ok(text.trim_start_matches('\u{feff}').to_string())
}

/// Load one tool's CSV output into a raw source table.
///
/// Cells are kept verbatim; short rows are preserved as-is (the table's
/// cell accessor is bounds-tolerant).
pub fn read_table(path: &Path) -> Result<SourceTable> {
    let content = read_file_as_utf8(path)?;
    let mut reader = ::csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(content.as_bytes());

    let columns: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(|c| c.to_string()).collect());
    }

    debug!(path = %path.display(), rows = rows.len(), columns = columns.len(), "loaded CSV");
    Ok(SourceTable::with_rows(columns, rows))
}
