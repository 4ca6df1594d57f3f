//! The correlated output record, its classification, and run statistics.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::record::{ExecutionRecord, FileRecord, LinkRecord};
use crate::error::FiletrailError;

/// Forensic verdict assigned to one correlated row.
///
/// Serialized and displayed with the exact report labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    #[serde(rename = "Executed & Accessed & Exists in File Table")]
    ExecutedAccessedExists,
    #[serde(rename = "Executed & Exists in File Table")]
    ExecutedExists,
    #[serde(rename = "Executed but Deleted")]
    ExecutedButDeleted,
    #[serde(rename = "Accessed & Possibly Deleted")]
    AccessedPossiblyDeleted,
    #[serde(rename = "Accessed (Link) but Not Executed")]
    AccessedNotExecuted,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl Classification {
    pub fn label(&self) -> &'static str {
        match self {
            Classification::ExecutedAccessedExists => "Executed & Accessed & Exists in File Table",
            Classification::ExecutedExists => "Executed & Exists in File Table",
            Classification::ExecutedButDeleted => "Executed but Deleted",
            Classification::AccessedPossiblyDeleted => "Accessed & Possibly Deleted",
            Classification::AccessedNotExecuted => "Accessed (Link) but Not Executed",
            Classification::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of the correlation result: up to one contributing record per
/// source, presence flags derived from contribution, and the assigned
/// classification.
///
/// Records own copies of their source rows; the result set has no
/// back-references into the input tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelatedRecord {
    pub file: Option<FileRecord>,
    pub execution: Option<ExecutionRecord>,
    pub link: Option<LinkRecord>,
    pub classification: Classification,
}

impl CorrelatedRecord {
    pub fn in_file_table(&self) -> bool {
        self.file.is_some()
    }

    pub fn in_execution_cache(&self) -> bool {
        self.execution.is_some()
    }

    pub fn in_link_history(&self) -> bool {
        self.link.is_some()
    }
}

/// Counters describing one pipeline run.
///
/// `unknown_count` should always be zero; a non-zero value means a row
/// survived the corroboration filter without satisfying any classification
/// rule and warrants investigation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationStats {
    pub file_table_rows: usize,
    pub execution_cache_rows: usize,
    pub link_history_rows: usize,
    pub stage1_rows: usize,
    pub stage2_rows: usize,
    pub dropped_uncorroborated: usize,
    pub output_rows: usize,
    pub unknown_count: usize,
}

impl CorrelationStats {
    pub fn to_json_string(&self) -> Result<String, FiletrailError> {
        serde_json::to_string_pretty(self).map_err(|e| FiletrailError::Serialization(e.to_string()))
    }
}

/// Full pipeline output: the classified record set plus run counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrelationOutput {
    pub records: Vec<CorrelatedRecord>,
    pub stats: CorrelationStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classification_labels() {
        assert_eq!(
            Classification::ExecutedAccessedExists.to_string(),
            "Executed & Accessed & Exists in File Table"
        );
        assert_eq!(
            Classification::AccessedNotExecuted.to_string(),
            "Accessed (Link) but Not Executed"
        );
        assert_eq!(Classification::Unknown.to_string(), "Unknown");
    }

    #[test]
    fn test_classification_serde_uses_labels() {
        let json = serde_json::to_string(&Classification::ExecutedButDeleted).unwrap();
        assert_eq!(json, "\"Executed but Deleted\"");
        let back: Classification = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Classification::ExecutedButDeleted);
    }

    #[test]
    fn test_presence_flags_follow_contribution() {
        let rec = CorrelatedRecord {
            file: None,
            execution: Some(crate::core::record::ExecutionRecord {
                name: "ghost.exe".into(),
                fields: vec![],
            }),
            link: None,
            classification: Classification::ExecutedButDeleted,
        };
        assert!(!rec.in_file_table());
        assert!(rec.in_execution_cache());
        assert!(!rec.in_link_history());
    }

    #[test]
    fn test_stats_json() {
        let stats = CorrelationStats {
            output_rows: 3,
            ..Default::default()
        };
        let json = stats.to_json_string().unwrap();
        assert!(json.contains("\"output_rows\": 3"));
    }
}
