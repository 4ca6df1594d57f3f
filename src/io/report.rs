//! Flattening and persistence of the correlated report.
//!
//! Output columns are the union of all three sources' columns, each
//! qualified with its source prefix, plus the derived `Forensic Analysis`
//! column. Qualification is unconditional: the tools share generic column
//! names, and an unqualified union would silently overwrite one source's
//! values with another's during the join.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::correlated::CorrelationOutput;
use crate::core::source::SourceId;
use crate::error::Result;

/// Name of the derived classification column.
pub const CLASSIFICATION_COLUMN: &str = "Forensic Analysis";

/// Default file name for the persisted report.
pub const DEFAULT_REPORT_NAME: &str = "Correlated_Forensic_Report.csv";

/// The flattened report table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn qualified(source: SourceId, columns: &[String]) -> impl Iterator<Item = String> + '_ {
    columns
        .iter()
        .map(move |c| format!("{}_{}", source.prefix(), c))
}

fn fill(row: &mut Vec<String>, fields: Option<&[String]>, width: usize) {
    match fields {
        Some(fields) => {
            for i in 0..width {
                row.push(fields.get(i).cloned().unwrap_or_default());
            }
        }
        None => row.extend(std::iter::repeat(String::new()).take(width)),
    }
}

/// Flatten the correlated record set against the source headers it was
/// produced from. Column order is file table, link history, execution
/// cache, then the classification.
pub fn build_report(
    file_columns: &[String],
    link_columns: &[String],
    execution_columns: &[String],
    output: &CorrelationOutput,
) -> ReportTable {
    let mut columns: Vec<String> = Vec::with_capacity(
        file_columns.len() + link_columns.len() + execution_columns.len() + 1,
    );
    columns.extend(qualified(SourceId::FileTable, file_columns));
    columns.extend(qualified(SourceId::LinkHistory, link_columns));
    columns.extend(qualified(SourceId::ExecutionCache, execution_columns));
    columns.push(CLASSIFICATION_COLUMN.to_string());

    let rows = output
        .records
        .iter()
        .map(|rec| {
            let mut row = Vec::with_capacity(columns.len());
            fill(
                &mut row,
                rec.file.as_ref().map(|f| f.fields.as_slice()),
                file_columns.len(),
            );
            fill(
                &mut row,
                rec.link.as_ref().map(|l| l.fields.as_slice()),
                link_columns.len(),
            );
            fill(
                &mut row,
                rec.execution.as_ref().map(|e| e.fields.as_slice()),
                execution_columns.len(),
            );
            row.push(rec.classification.label().to_string());
            row
        })
        .collect();

    ReportTable { columns, rows }
}

/// Write the report table as CSV.
pub fn write_report(path: &Path, report: &ReportTable) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new().from_path(path)?;
    writer.write_record(&report.columns)?;
    for row in &report.rows {
        writer.write_record(row)?;
    }
    writer.flush()?;
    info!(path = %path.display(), rows = report.rows.len(), "report written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::correlated::{Classification, CorrelatedRecord, CorrelationStats};
    use crate::core::record::{ExecutionRecord, FileRecord};

    fn sample_output() -> CorrelationOutput {
        CorrelationOutput {
            records: vec![CorrelatedRecord {
                file: Some(FileRecord {
                    entry_number: Some(10),
                    sequence_number: Some(1),
                    file_name: "evil.exe".into(),
                    fields: vec!["10".into(), "1".into(), "evil.exe".into()],
                }),
                execution: Some(ExecutionRecord {
                    name: "evil.exe".into(),
                    fields: vec!["evil.exe".into(), "da39".into()],
                }),
                link: None,
                classification: Classification::ExecutedExists,
            }],
            stats: CorrelationStats::default(),
        }
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_columns_are_source_qualified() {
        let report = build_report(
            &cols(&["EntryNumber", "SequenceNumber", "FileName"]),
            &cols(&["SourceFile", "TargetMFTEntryNumber"]),
            &cols(&["Name", "Sha1"]),
            &sample_output(),
        );
        assert_eq!(
            report.columns,
            vec![
                "MFT_EntryNumber",
                "MFT_SequenceNumber",
                "MFT_FileName",
                "LNK_SourceFile",
                "LNK_TargetMFTEntryNumber",
                "Amcache_Name",
                "Amcache_Sha1",
                "Forensic Analysis",
            ]
        );
    }

    #[test]
    fn test_colliding_source_columns_stay_distinct() {
        // Both tools emit a column literally named "SourceFile".
        let report = build_report(
            &cols(&["SourceFile"]),
            &cols(&["SourceFile"]),
            &cols(&["SourceFile"]),
            &CorrelationOutput {
                records: vec![],
                stats: CorrelationStats::default(),
            },
        );
        let unique: std::collections::HashSet<&String> = report.columns.iter().collect();
        assert_eq!(unique.len(), report.columns.len());
    }

    #[test]
    fn test_absent_source_padded_with_empty_cells() {
        let report = build_report(
            &cols(&["EntryNumber", "SequenceNumber", "FileName"]),
            &cols(&["SourceFile", "TargetMFTEntryNumber"]),
            &cols(&["Name", "Sha1"]),
            &sample_output(),
        );
        let row = &report.rows[0];
        assert_eq!(row.len(), report.columns.len());
        assert_eq!(&row[0..3], &["10", "1", "evil.exe"]);
        // Link side did not contribute.
        assert_eq!(&row[3..5], &["", ""]);
        assert_eq!(&row[5..7], &["evil.exe", "da39"]);
        assert_eq!(row[7], "Executed & Exists in File Table");
    }

    #[test]
    fn test_write_report_round_trip() {
        let report = build_report(
            &cols(&["EntryNumber", "SequenceNumber", "FileName"]),
            &cols(&["SourceFile", "TargetMFTEntryNumber"]),
            &cols(&["Name", "Sha1"]),
            &sample_output(),
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(DEFAULT_REPORT_NAME);
        write_report(&path, &report).unwrap();

        let table = crate::io::csv::read_table(&path).unwrap();
        assert_eq!(table.columns, report.columns);
        assert_eq!(table.rows, report.rows);
    }
}
