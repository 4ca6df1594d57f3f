//! Shared fixtures for integration tests: builders for the three source
//! tables in their default tool schemas.

use filetrail::SourceTable;

pub const FILE_TABLE_COLUMNS: [&str; 4] =
    ["EntryNumber", "SequenceNumber", "FileName", "InUse"];
pub const LINK_COLUMNS: [&str; 4] = [
    "SourceFile",
    "TargetMFTEntryNumber",
    "TargetMFTSequenceNumber",
    "LocalPath",
];
pub const EXECUTION_COLUMNS: [&str; 3] = ["Name", "FullPath", "SHA1"];

fn to_table(columns: &[&str], rows: Vec<Vec<&str>>) -> SourceTable {
    SourceTable::with_rows(
        columns.iter().map(|c| c.to_string()).collect(),
        rows.into_iter()
            .map(|r| r.into_iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

pub fn file_table(rows: Vec<Vec<&str>>) -> SourceTable {
    to_table(&FILE_TABLE_COLUMNS, rows)
}

pub fn link_table(rows: Vec<Vec<&str>>) -> SourceTable {
    to_table(&LINK_COLUMNS, rows)
}

pub fn execution_table(rows: Vec<Vec<&str>>) -> SourceTable {
    to_table(&EXECUTION_COLUMNS, rows)
}

/// The three-source scenario used across the integration tests: one fully
/// correlated binary, one accessed document, one ghost execution, one
/// uncorroborated file record.
pub fn scenario_tables() -> (SourceTable, SourceTable, SourceTable) {
    let files = file_table(vec![
        vec!["10", "1", "evil.exe", "true"],
        vec!["11", "3", "report.docx", "true"],
        vec!["12", "1", "quiet.txt", "true"],
    ]);
    let links = link_table(vec![
        vec!["evil.lnk", "0xA", "0x1", "C:\\Temp\\evil.exe"],
        vec!["report.lnk", "11", "3", "C:\\Docs\\report.docx"],
    ]);
    let executions = execution_table(vec![
        vec!["evil.exe", "C:\\Temp\\evil.exe", "da39a3ee"],
        vec!["ghost.exe", "C:\\Temp\\ghost.exe", "5ba93c9d"],
    ]);
    (files, links, executions)
}
