//! Error types for the filetrail correlation pipeline.
//!
//! This module provides structured error handling using thiserror. Pipeline
//! preconditions (missing sources, unmapped columns) fail fast naming the
//! offending source; row-level key problems degrade to missing keys and
//! never abort a run.

use thiserror::Error;

use crate::core::source::SourceId;

/// Main error type for filetrail operations.
#[derive(Debug, Error)]
pub enum FiletrailError {
    /// A required input collection is absent or has no rows.
    #[error("required source {which} is empty or missing")]
    EmptySource { which: SourceId },

    /// A mapped semantic column is not present in the input's header.
    #[error("source {which} has no column named {column:?}")]
    ColumnMissing { which: SourceId, column: String },

    /// An external extraction tool exited unsuccessfully.
    #[error("tool {tool} failed with {status}")]
    ToolFailed { tool: String, status: String },

    /// No tool output matched a discovery pattern.
    #[error("no file matching {pattern:?} found in {dir}")]
    OutputNotFound { pattern: String, dir: String },

    /// A discovery pattern could not be compiled.
    #[error("invalid discovery pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// CSV parse or write errors
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for filetrail operations
pub type Result<T> = std::result::Result<T, FiletrailError>;
