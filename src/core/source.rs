//! Source identities and the raw tabular input representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifies one of the three artifact sources feeding the correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SourceId {
    /// File-system metadata (MFT) records.
    FileTable,
    /// Application-execution cache (Amcache) records.
    ExecutionCache,
    /// Shortcut/link (LNK) access records.
    LinkHistory,
}

impl SourceId {
    /// Stable prefix used to source-qualify output column names.
    ///
    /// Every output column carries its source prefix so that generic column
    /// names shared between tools (e.g. `Created0x10`, `SourceFile`) cannot
    /// silently overwrite one another during the join.
    pub fn prefix(&self) -> &'static str {
        match self {
            SourceId::FileTable => "MFT",
            SourceId::ExecutionCache => "Amcache",
            SourceId::LinkHistory => "LNK",
        }
    }
}

impl fmt::Display for SourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceId::FileTable => "file table",
            SourceId::ExecutionCache => "execution cache",
            SourceId::LinkHistory => "link history",
        };
        write!(f, "{}", name)
    }
}

/// A raw tabular record collection as parsed from one tool's output.
///
/// Cells are kept exactly as parsed; an empty string is an absent value.
/// Rows may be ragged when the producing tool emitted short lines, so cell
/// access is bounds-tolerant.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl SourceTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn with_rows(columns: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Index of a named column, if present in the header.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell content at (row, column index); empty string when the row is
    /// shorter than the header.
    pub fn cell<'a>(&'a self, row: &'a [String], idx: usize) -> &'a str {
        row.get(idx).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_prefixes_distinct() {
        let prefixes = [
            SourceId::FileTable.prefix(),
            SourceId::ExecutionCache.prefix(),
            SourceId::LinkHistory.prefix(),
        ];
        assert_eq!(prefixes, ["MFT", "Amcache", "LNK"]);
    }

    #[test]
    fn test_column_index() {
        let table = SourceTable::new(vec!["EntryNumber".into(), "FileName".into()]);
        assert_eq!(table.column_index("FileName"), Some(1));
        assert_eq!(table.column_index("Missing"), None);
    }

    #[test]
    fn test_ragged_row_cell_access() {
        let table = SourceTable::with_rows(
            vec!["A".into(), "B".into(), "C".into()],
            vec![vec!["1".into()]],
        );
        let row = &table.rows[0];
        assert_eq!(table.cell(row, 0), "1");
        assert_eq!(table.cell(row, 2), "");
    }
}
