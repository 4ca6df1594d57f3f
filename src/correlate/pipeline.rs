//! Pipeline orchestration: precondition checks, extraction, the two join
//! stages, the corroboration filter, and classification.
//!
//! `correlate` is a pure function of its inputs, with no I/O and no hidden
//! state, so it is testable without the process-running and file-discovery
//! collaborators. A run either returns the complete classified set or fails
//! entirely; partial results are not produced.

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::core::correlated::{CorrelatedRecord, CorrelationOutput, CorrelationStats};
use crate::core::source::{SourceId, SourceTable};
use crate::correlate::classify::classify;
use crate::correlate::config::CorrelateConfig;
use crate::correlate::{extract, join};
use crate::error::{FiletrailError, Result};

fn require_rows(table: &SourceTable, source: SourceId) -> Result<()> {
    if table.is_empty() {
        return Err(FiletrailError::EmptySource { which: source });
    }
    Ok(())
}

/// Correlate the three source tables into the classified record set.
///
/// Fails before any join work when a source has no rows or a mapped column
/// is absent from its header; joining against an accidentally empty source
/// would otherwise produce a misleading partial report.
pub fn correlate(
    file_table: &SourceTable,
    link_history: &SourceTable,
    execution_cache: &SourceTable,
    config: &CorrelateConfig,
) -> Result<CorrelationOutput> {
    let span = tracing::info_span!(
        "correlate",
        file_table_rows = file_table.len(),
        link_history_rows = link_history.len(),
        execution_cache_rows = execution_cache.len()
    );
    let _g = span.enter();

    require_rows(file_table, SourceId::FileTable)?;
    require_rows(link_history, SourceId::LinkHistory)?;
    require_rows(execution_cache, SourceId::ExecutionCache)?;

    debug!(phase = "extract", "normalizing keys");
    let files = extract::file_records(file_table, &config.file_table)?;
    let links = extract::link_records(link_history, &config.link)?;
    let executions = extract::execution_records(execution_cache, &config.execution)?;

    debug!(phase = "stage1", "file table x link history");
    let merged = join::stage1(&files, &links);
    let stage1_rows = merged.len();

    debug!(phase = "stage2", "merged x execution cache");
    let joined = join::stage2(&merged, &executions);
    let stage2_rows = joined.len();

    debug!(phase = "filter", "dropping uncorroborated rows");
    let (kept, dropped_uncorroborated) = join::drop_uncorroborated(joined);

    debug!(phase = "classify", rows = kept.len(), "assigning verdicts");
    let records: Vec<CorrelatedRecord> = kept
        .into_par_iter()
        .map(|row| {
            let classification = classify(
                row.file.is_some(),
                row.execution.is_some(),
                row.link.is_some(),
            );
            CorrelatedRecord {
                file: row.file,
                execution: row.execution,
                link: row.link,
                classification,
            }
        })
        .collect();

    let unknown_count = records
        .iter()
        .filter(|r| r.classification == crate::core::correlated::Classification::Unknown)
        .count();
    if unknown_count > 0 {
        // Structurally unreachable after the corroboration filter; a hit
        // means the filter invariant has been violated upstream.
        warn!(unknown_count, "rows classified Unknown; investigate inputs");
    }

    let stats = CorrelationStats {
        file_table_rows: file_table.len(),
        execution_cache_rows: execution_cache.len(),
        link_history_rows: link_history.len(),
        stage1_rows,
        stage2_rows,
        dropped_uncorroborated,
        output_rows: records.len(),
        unknown_count,
    };
    info!(
        output_rows = stats.output_rows,
        dropped = stats.dropped_uncorroborated,
        "correlation complete"
    );

    Ok(CorrelationOutput { records, stats })
}
