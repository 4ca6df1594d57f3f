//! The correlation engine: key normalization, the two-stage outer join,
//! rule-ordered classification, and the orchestrating pipeline.

pub mod classify;
pub mod config;
pub mod extract;
pub mod join;
pub mod key;
pub mod pipeline;

pub use config::{CorrelateConfig, ExecutionMapping, FileTableMapping, LinkMapping};
pub use pipeline::correlate;
