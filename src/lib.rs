//! filetrail correlates three Windows forensic artifact streams (file-table
//! metadata, application-execution cache entries, and shortcut access
//! metadata) into one classified record set: for each observed file, whether
//! it was executed, accessed, deleted, or some combination.
//!
//! The correlation core ([`correlate()`]) is a pure in-memory transformation
//! over raw tabular inputs. Collection ([`tools`]), output discovery and
//! CSV handling ([`io`]), and report persistence are thin collaborators
//! around it.

/// Core data types module
pub mod core;
/// The correlation engine
pub mod correlate;
/// Error types
pub mod error;
/// CSV ingestion, discovery, and report persistence
pub mod io;
/// Logging initialization
pub mod logging;
/// External extraction tool runners
pub mod tools;

pub use crate::core::correlated::{
    Classification, CorrelatedRecord, CorrelationOutput, CorrelationStats,
};
pub use crate::core::record::{ExecutionRecord, FileRecord, LinkRecord};
pub use crate::core::source::{SourceId, SourceTable};
pub use crate::correlate::{correlate, CorrelateConfig};
pub use crate::error::{FiletrailError, Result};
