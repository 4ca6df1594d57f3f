use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};

use filetrail::correlate::CorrelateConfig;
use filetrail::io::csv::read_table;
use filetrail::io::discover::{latest_matching, DiscoveryConfig};
use filetrail::io::report::{build_report, write_report, DEFAULT_REPORT_NAME};
use filetrail::tools::CollectConfig;

#[derive(Parser)]
#[command(name = "filetrail", version, about = "Correlate file-table, execution-cache, and link artifacts into a forensic report")]
struct Cli {
    /// Directory tool CSVs are written to and read from
    #[arg(long, global = true, default_value = "C:\\ToolOutputs", env = "FILETRAIL_OUTPUT_DIR")]
    output_dir: PathBuf,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the three extraction tools against the local system
    Collect(CollectArgs),
    /// Correlate the newest tool outputs into the report
    Correlate(CorrelateArgs),
    /// Collect, then correlate
    Run {
        #[command(flatten)]
        collect: CollectArgs,
        #[command(flatten)]
        correlate: CorrelateArgs,
    },
}

#[derive(Args)]
struct CollectArgs {
    /// Path to the MFTECmd executable
    #[arg(long)]
    mftecmd: PathBuf,

    /// Path to the AmcacheParser executable
    #[arg(long)]
    amcache_parser: PathBuf,

    /// Path to the LECmd executable
    #[arg(long)]
    lecmd: PathBuf,

    /// File-table image to parse
    #[arg(long, default_value = "C:\\$MFT")]
    mft: PathBuf,

    /// Execution-cache hive to parse
    #[arg(long, default_value = "C:\\Windows\\AppCompat\\Programs\\Amcache.hve")]
    amcache_hive: PathBuf,

    /// Root directory searched for shortcut files
    #[arg(long, default_value = "C:\\Users")]
    lnk_root: PathBuf,
}

#[derive(Args)]
struct CorrelateArgs {
    /// Report path; defaults to the report name inside the output directory
    #[arg(long)]
    report: Option<PathBuf>,

    /// Print run statistics as JSON on stdout
    #[arg(long)]
    stats: bool,

    /// Delete the discovered intermediate CSVs after the report is written
    #[arg(long)]
    cleanup: bool,
}

impl CollectArgs {
    fn to_config(&self, output_dir: &PathBuf) -> CollectConfig {
        CollectConfig {
            output_dir: output_dir.clone(),
            mftecmd: self.mftecmd.clone(),
            amcache_parser: self.amcache_parser.clone(),
            lecmd: self.lecmd.clone(),
            mft_path: self.mft.clone(),
            amcache_hive: self.amcache_hive.clone(),
            lnk_root: self.lnk_root.clone(),
        }
    }
}

fn collect(args: &CollectArgs, output_dir: &PathBuf) -> anyhow::Result<()> {
    std::fs::create_dir_all(output_dir)
        .with_context(|| format!("creating output directory {}", output_dir.display()))?;
    filetrail::tools::collect_all(&args.to_config(output_dir))?;
    Ok(())
}

fn correlate(args: &CorrelateArgs, output_dir: &PathBuf) -> anyhow::Result<()> {
    let discovery = DiscoveryConfig::default();
    let file_path = latest_matching(output_dir, &discovery.file_table)?;
    let link_path = latest_matching(output_dir, &discovery.link_history)?;
    let exec_path = latest_matching(output_dir, &discovery.execution_cache)?;

    let file_table = read_table(&file_path)?;
    let link_history = read_table(&link_path)?;
    let execution_cache = read_table(&exec_path)?;

    let config = CorrelateConfig::default();
    let output = filetrail::correlate(&file_table, &link_history, &execution_cache, &config)?;

    let report = build_report(
        &file_table.columns,
        &link_history.columns,
        &execution_cache.columns,
        &output,
    );
    let report_path = args
        .report
        .clone()
        .unwrap_or_else(|| output_dir.join(DEFAULT_REPORT_NAME));
    write_report(&report_path, &report)?;
    info!(report = %report_path.display(), "correlated forensic report saved");

    if args.stats {
        println!("{}", output.stats.to_json_string()?);
    }

    if args.cleanup {
        for path in [&file_path, &link_path, &exec_path] {
            if let Err(e) = std::fs::remove_file(path) {
                warn!(path = %path.display(), error = %e, "failed to remove intermediate");
            } else {
                info!(path = %path.display(), "removed intermediate");
            }
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    if cli.json_logs {
        filetrail::logging::init_tracing_json();
    } else {
        filetrail::logging::init_tracing();
    }

    match &cli.command {
        Command::Collect(args) => collect(args, &cli.output_dir),
        Command::Correlate(args) => correlate(args, &cli.output_dir),
        Command::Run {
            collect: collect_args,
            correlate: correlate_args,
        } => {
            collect(collect_args, &cli.output_dir)?;
            correlate(correlate_args, &cli.output_dir)
        }
    }
}
