//! Configuration for the correlation pipeline.
//!
//! The upstream tools rename or prefix their columns between releases, so
//! the mapping from physical column names to the semantic fields is
//! explicit, declared configuration. A mapping that does not resolve
//! against an input's actual header is a fatal configuration error reported
//! before any join work (never a runtime key-lookup failure mid-join).

use serde::{Deserialize, Serialize};

/// Master configuration for the correlation pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorrelateConfig {
    /// Column mapping for the file-table source.
    pub file_table: FileTableMapping,
    /// Column mapping for the execution-cache source.
    pub execution: ExecutionMapping,
    /// Column mapping for the link-history source.
    pub link: LinkMapping,
}

/// Semantic column names for the file-table (MFTECmd) output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileTableMapping {
    pub entry_number: String,
    pub sequence_number: String,
    pub file_name: String,
}

impl Default for FileTableMapping {
    fn default() -> Self {
        Self {
            entry_number: "EntryNumber".to_string(),
            sequence_number: "SequenceNumber".to_string(),
            file_name: "FileName".to_string(),
        }
    }
}

/// Semantic column names for the link-history (LECmd) output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinkMapping {
    pub target_entry_number: String,
    pub target_sequence_number: String,
}

impl Default for LinkMapping {
    fn default() -> Self {
        Self {
            target_entry_number: "TargetMFTEntryNumber".to_string(),
            target_sequence_number: "TargetMFTSequenceNumber".to_string(),
        }
    }
}

/// Semantic column names for the execution-cache (AmcacheParser) output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionMapping {
    pub name: String,
}

impl Default for ExecutionMapping {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
        }
    }
}
