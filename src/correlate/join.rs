//! The two-stage full outer join across the three record sets.
//!
//! Stage 1 pairs file-table records with link records on the compound
//! (entry, sequence) key; stage 2 pairs the result with execution-cache
//! records on raw name equality. Rows unmatched on either side always
//! survive, padded with `None`, and non-unique keys multiply rows: every
//! distinct evidentiary pairing is a separate reportable correlation, never
//! deduplicated.

use std::collections::HashMap;

use crate::core::record::{ExecutionRecord, FileRecord, LinkRecord};

/// Stage-1 output: a file-table record, a link record, or a matched pair.
#[derive(Debug, Clone)]
pub struct MergedRow {
    pub file: Option<FileRecord>,
    pub link: Option<LinkRecord>,
}

/// Stage-2 output: the fully joined row prior to filtering and
/// classification.
#[derive(Debug, Clone)]
pub struct JoinedRow {
    pub file: Option<FileRecord>,
    pub execution: Option<ExecutionRecord>,
    pub link: Option<LinkRecord>,
}

/// Full outer join of file-table records against link records.
///
/// Matching requires both compound-key components to normalize and agree;
/// entry-number agreement alone is not a match, which keeps reused table
/// slots from producing false pairings. Records whose keys failed to
/// normalize participate only as unmatched rows.
pub fn stage1(files: &[FileRecord], links: &[LinkRecord]) -> Vec<MergedRow> {
    let mut by_key: HashMap<(i64, i64), Vec<usize>> = HashMap::new();
    for (idx, link) in links.iter().enumerate() {
        if let Some(key) = link.key() {
            by_key.entry(key).or_default().push(idx);
        }
    }

    let mut matched = vec![false; links.len()];
    let mut out = Vec::with_capacity(files.len());

    for file in files {
        let candidates = file.key().and_then(|k| by_key.get(&k));
        match candidates {
            Some(indices) => {
                for &idx in indices {
                    matched[idx] = true;
                    out.push(MergedRow {
                        file: Some(file.clone()),
                        link: Some(links[idx].clone()),
                    });
                }
            }
            None => out.push(MergedRow {
                file: Some(file.clone()),
                link: None,
            }),
        }
    }

    for (idx, link) in links.iter().enumerate() {
        if !matched[idx] {
            out.push(MergedRow {
                file: None,
                link: Some(link.clone()),
            });
        }
    }

    out
}

/// Full outer join of stage-1 rows against execution-cache records.
///
/// The key is plain string equality between the file-table file name and
/// the execution-cache name: no case folding, no separator or path
/// normalization. Two distinct files sharing a basename will therefore
/// correlate. This is a known, accepted limitation: the sources do not
/// expose comparable full paths. Rows without a file-table side have no
/// key and never match.
pub fn stage2(rows: &[MergedRow], executions: &[ExecutionRecord]) -> Vec<JoinedRow> {
    let mut by_name: HashMap<&str, Vec<usize>> = HashMap::new();
    for (idx, exec) in executions.iter().enumerate() {
        by_name.entry(exec.name.as_str()).or_default().push(idx);
    }

    let mut matched = vec![false; executions.len()];
    let mut out = Vec::with_capacity(rows.len());

    for row in rows {
        let candidates = row
            .file
            .as_ref()
            .and_then(|f| by_name.get(f.file_name.as_str()));
        match candidates {
            Some(indices) => {
                for &idx in indices {
                    matched[idx] = true;
                    out.push(JoinedRow {
                        file: row.file.clone(),
                        execution: Some(executions[idx].clone()),
                        link: row.link.clone(),
                    });
                }
            }
            None => out.push(JoinedRow {
                file: row.file.clone(),
                execution: None,
                link: row.link.clone(),
            }),
        }
    }

    for (idx, exec) in executions.iter().enumerate() {
        if !matched[idx] {
            out.push(JoinedRow {
                file: None,
                execution: Some(exec.clone()),
                link: None,
            });
        }
    }

    out
}

/// Post-join corroboration filter: a file-table record alone is not
/// forensically interesting for this report. Returns the surviving rows and
/// the dropped count.
pub fn drop_uncorroborated(rows: Vec<JoinedRow>) -> (Vec<JoinedRow>, usize) {
    let before = rows.len();
    let kept: Vec<JoinedRow> = rows
        .into_iter()
        .filter(|row| row.execution.is_some() || row.link.is_some())
        .collect();
    let dropped = before - kept.len();
    (kept, dropped)
}
