//! Typed per-source records extracted from raw tables.
//!
//! Each record owns a full copy of its originating row so correlated output
//! can outlive the input tables. Join keys are normalized up front; `None`
//! marks a key that was absent or failed to normalize and never matches
//! anything during correlation.

use serde::{Deserialize, Serialize};

/// One file-table (MFT) entry at a point in time.
///
/// The (entry, sequence) pair identifies a table slot and its reuse
/// generation; entry number alone is not unique once a slot has been
/// recycled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRecord {
    pub entry_number: Option<i64>,
    pub sequence_number: Option<i64>,
    pub file_name: String,
    /// Full passthrough row, aligned to the source table's header.
    pub fields: Vec<String>,
}

/// One recorded shortcut/link access pointing at a (possibly deleted)
/// file-table entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub target_entry_number: Option<i64>,
    pub target_sequence_number: Option<i64>,
    pub fields: Vec<String>,
}

/// Evidence that a binary was executed, independent of current file-table
/// state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    pub name: String,
    pub fields: Vec<String>,
}

impl FileRecord {
    /// Complete compound join key, present only when both components
    /// normalized.
    pub fn key(&self) -> Option<(i64, i64)> {
        Some((self.entry_number?, self.sequence_number?))
    }
}

impl LinkRecord {
    pub fn key(&self) -> Option<(i64, i64)> {
        Some((self.target_entry_number?, self.target_sequence_number?))
    }
}
