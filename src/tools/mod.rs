//! Runners for the external extraction tools.
//!
//! Each of the three artifact sources is produced by an external command
//! (MFTECmd, AmcacheParser, LECmd) writing CSV into the collection
//! directory. The runners are thin: build the argument list, capture
//! output, surface non-zero exit as a typed error. All paths arrive via an
//! explicit config passed in at call time.

use std::path::{Path, PathBuf};
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{FiletrailError, Result};

/// File name AmcacheParser is asked to write; its per-category outputs
/// derive from this stem.
pub const AMCACHE_OUTPUT_NAME: &str = "amcache_output.csv";

/// Paths for one collection run: the tool executables, the artifacts they
/// examine, and the directory their CSVs land in.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectConfig {
    pub output_dir: PathBuf,
    pub mftecmd: PathBuf,
    pub amcache_parser: PathBuf,
    pub lecmd: PathBuf,
    /// File-table image to parse (e.g. `C:\$MFT`).
    pub mft_path: PathBuf,
    /// Execution-cache hive (e.g. `C:\Windows\AppCompat\Programs\Amcache.hve`).
    pub amcache_hive: PathBuf,
    /// Root directory searched recursively for shortcut files.
    pub lnk_root: PathBuf,
}

fn run_tool(name: &str, program: &Path, args: &[&str]) -> Result<()> {
    info!(tool = name, program = %program.display(), "running");
    let output = Command::new(program).args(args).output().map_err(|e| {
        FiletrailError::ToolFailed {
            tool: name.to_string(),
            status: format!("failed to start: {e}"),
        }
    })?;

    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        info!(tool = name, "{}", stdout.trim_end());
    }
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        warn!(tool = name, "{}", stderr.trim_end());
    }

    if !output.status.success() {
        return Err(FiletrailError::ToolFailed {
            tool: name.to_string(),
            status: output.status.to_string(),
        });
    }
    Ok(())
}

/// Parse the file table, including entries with both standard-information
/// and file-name timestamps.
pub fn collect_file_table(config: &CollectConfig) -> Result<()> {
    let out = config.output_dir.display().to_string();
    let mft = config.mft_path.display().to_string();
    run_tool(
        "MFTECmd",
        &config.mftecmd,
        &["-f", &mft, "--csv", &out, "--at"],
    )
}

/// Parse the execution-cache hive into per-category CSVs.
pub fn collect_execution_cache(config: &CollectConfig) -> Result<()> {
    let out = config.output_dir.display().to_string();
    let hive = config.amcache_hive.display().to_string();
    run_tool(
        "AmcacheParser",
        &config.amcache_parser,
        &["-f", &hive, "--csv", &out, "--csvf", AMCACHE_OUTPUT_NAME],
    )
}

/// Parse every shortcut file under the configured root.
pub fn collect_link_history(config: &CollectConfig) -> Result<()> {
    let out = config.output_dir.display().to_string();
    let root = config.lnk_root.display().to_string();
    run_tool("LECmd", &config.lecmd, &["-d", &root, "--csv", &out])
}

/// Run all three collectors in sequence, stopping at the first failure.
pub fn collect_all(config: &CollectConfig) -> Result<()> {
    collect_file_table(config)?;
    collect_execution_cache(config)?;
    collect_link_history(config)?;
    Ok(())
}
