//! Discovery of the most recent tool output in the collection directory.
//!
//! Each tool stamps its CSV names with a timestamp prefix, so a collection
//! directory accumulates outputs across runs. Correlation always wants the
//! newest file matching each tool's naming pattern.

use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local};
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{FiletrailError, Result};

/// Filename patterns identifying each source's CSV in the collection
/// directory. `*` matches any run of characters; matching is
/// case-insensitive, as are the filesystems these outputs land on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscoveryConfig {
    pub file_table: String,
    pub link_history: String,
    pub execution_cache: String,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            file_table: "*MFTECmd*Output.csv".to_string(),
            link_history: "*LECmd_Output.csv".to_string(),
            execution_cache: "*amcache_output_UnassociatedFileEntries.csv".to_string(),
        }
    }
}

fn pattern_regex(pattern: &str) -> Result<Regex> {
    let mut expr = String::from("(?i)^");
    for (i, part) in pattern.split('*').enumerate() {
        if i > 0 {
            expr.push_str(".*");
        }
        expr.push_str(&regex::escape(part));
    }
    expr.push('$');
    Regex::new(&expr).map_err(|e| FiletrailError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

/// Find the newest regular file in `dir` whose name matches `pattern`.
pub fn latest_matching(dir: &Path, pattern: &str) -> Result<PathBuf> {
    let regex = pattern_regex(pattern)?;

    let mut newest: Option<(SystemTime, PathBuf)> = None;
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let meta = entry.metadata()?;
        if !meta.is_file() {
            continue;
        }
        let name = entry.file_name();
        let Some(name) = name.to_str() else { continue };
        if !regex.is_match(name) {
            continue;
        }
        let modified = meta.modified()?;
        if newest.as_ref().map_or(true, |(t, _)| modified > *t) {
            newest = Some((modified, entry.path()));
        }
    }

    match newest {
        Some((modified, path)) => {
            info!(
                path = %path.display(),
                modified = %DateTime::<Local>::from(modified).format("%Y-%m-%d %H:%M:%S"),
                "selected tool output"
            );
            Ok(path)
        }
        None => Err(FiletrailError::OutputNotFound {
            pattern: pattern.to_string(),
            dir: dir.display().to_string(),
        }),
    }
}
