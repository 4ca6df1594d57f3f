//! Extraction of typed records from raw source tables.
//!
//! Resolves the declared column mapping against each table's actual header
//! up front, then normalizes join keys row by row. Rows are independent, so
//! extraction fans out across threads; ordering is preserved by the
//! indexed collect.

use rayon::prelude::*;

use crate::core::record::{ExecutionRecord, FileRecord, LinkRecord};
use crate::core::source::{SourceId, SourceTable};
use crate::correlate::config::{ExecutionMapping, FileTableMapping, LinkMapping};
use crate::correlate::key::normalize_key;
use crate::error::{FiletrailError, Result};

fn require_column(table: &SourceTable, source: SourceId, name: &str) -> Result<usize> {
    table
        .column_index(name)
        .ok_or_else(|| FiletrailError::ColumnMissing {
            which: source,
            column: name.to_string(),
        })
}

/// Extract typed file-table records.
pub fn file_records(table: &SourceTable, mapping: &FileTableMapping) -> Result<Vec<FileRecord>> {
    let source = SourceId::FileTable;
    let entry_idx = require_column(table, source, &mapping.entry_number)?;
    let seq_idx = require_column(table, source, &mapping.sequence_number)?;
    let name_idx = require_column(table, source, &mapping.file_name)?;

    Ok(table
        .rows
        .par_iter()
        .map(|row| FileRecord {
            entry_number: normalize_key(table.cell(row, entry_idx)),
            sequence_number: normalize_key(table.cell(row, seq_idx)),
            file_name: table.cell(row, name_idx).to_string(),
            fields: row.clone(),
        })
        .collect())
}

/// Extract typed link-history records.
pub fn link_records(table: &SourceTable, mapping: &LinkMapping) -> Result<Vec<LinkRecord>> {
    let source = SourceId::LinkHistory;
    let entry_idx = require_column(table, source, &mapping.target_entry_number)?;
    let seq_idx = require_column(table, source, &mapping.target_sequence_number)?;

    Ok(table
        .rows
        .par_iter()
        .map(|row| LinkRecord {
            target_entry_number: normalize_key(table.cell(row, entry_idx)),
            target_sequence_number: normalize_key(table.cell(row, seq_idx)),
            fields: row.clone(),
        })
        .collect())
}

/// Extract typed execution-cache records.
pub fn execution_records(
    table: &SourceTable,
    mapping: &ExecutionMapping,
) -> Result<Vec<ExecutionRecord>> {
    let name_idx = require_column(table, SourceId::ExecutionCache, &mapping.name)?;

    Ok(table
        .rows
        .par_iter()
        .map(|row| ExecutionRecord {
            name: table.cell(row, name_idx).to_string(),
            fields: row.clone(),
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::correlate::config::CorrelateConfig;

    fn file_table() -> SourceTable {
        SourceTable::with_rows(
            vec![
                "EntryNumber".into(),
                "SequenceNumber".into(),
                "FileName".into(),
                "SI<FN".into(),
            ],
            vec![
                vec!["10".into(), "1".into(), "evil.exe".into(), "false".into()],
                vec!["0x1A".into(), "2".into(), "note.txt".into(), "true".into()],
                vec!["".into(), "3".into(), "orphan.dll".into(), "false".into()],
            ],
        )
    }

    #[test]
    fn test_file_records_normalize_keys() {
        let cfg = CorrelateConfig::default();
        let records = file_records(&file_table(), &cfg.file_table).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].key(), Some((10, 1)));
        assert_eq!(records[1].key(), Some((26, 2)));
        assert_eq!(records[2].key(), None);
        assert_eq!(records[2].file_name, "orphan.dll");
        // Passthrough row survives intact
        assert_eq!(records[1].fields[3], "true");
    }

    #[test]
    fn test_missing_column_is_fatal_and_named() {
        let cfg = CorrelateConfig::default();
        let table = SourceTable::new(vec!["EntryNumber".into(), "FileName".into()]);
        let err = file_records(&table, &cfg.file_table).unwrap_err();
        match err {
            FiletrailError::ColumnMissing { which: source, column } => {
                assert_eq!(source, SourceId::FileTable);
                assert_eq!(column, "SequenceNumber");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_link_records_hex_keys() {
        let cfg = CorrelateConfig::default();
        let table = SourceTable::with_rows(
            vec![
                "SourceFile".into(),
                "TargetMFTEntryNumber".into(),
                "TargetMFTSequenceNumber".into(),
            ],
            vec![vec!["a.lnk".into(), "0xA".into(), "0x1".into()]],
        );
        let records = link_records(&table, &cfg.link).unwrap();
        assert_eq!(records[0].key(), Some((10, 1)));
    }

    #[test]
    fn test_execution_records() {
        let cfg = CorrelateConfig::default();
        let table = SourceTable::with_rows(
            vec!["Name".into(), "Sha1".into()],
            vec![vec!["evil.exe".into(), "da39a3ee".into()]],
        );
        let records = execution_records(&table, &cfg.execution).unwrap();
        assert_eq!(records[0].name, "evil.exe");
    }
}
