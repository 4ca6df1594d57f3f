//! Rule-ordered classification of correlated rows.
//!
//! The verdict is decided by an explicit ordered rule list evaluated
//! top-down, first match wins. The order carries meaning: a row with all
//! three presences also satisfies several later rules, and reordering the
//! list silently changes the verdict for such rows. `Unknown` is the
//! fallback for rows matching no rule; after the corroboration filter it
//! should never occur, and the pipeline counts any occurrence as a defect
//! signal.

use crate::core::correlated::Classification;

/// One classification rule: a pattern over the three presence flags and the
/// label assigned when it matches. `None` components match either value.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub file_table: Option<bool>,
    pub execution: Option<bool>,
    pub link: Option<bool>,
    pub label: Classification,
}

impl Rule {
    fn matches(&self, file_table: bool, execution: bool, link: bool) -> bool {
        fn component(pattern: Option<bool>, flag: bool) -> bool {
            pattern.map_or(true, |want| want == flag)
        }
        component(self.file_table, file_table)
            && component(self.execution, execution)
            && component(self.link, link)
    }
}

/// The decision list, highest priority first.
pub const CLASSIFICATION_RULES: [Rule; 5] = [
    Rule {
        file_table: Some(true),
        execution: Some(true),
        link: Some(true),
        label: Classification::ExecutedAccessedExists,
    },
    Rule {
        file_table: Some(true),
        execution: Some(true),
        link: None,
        label: Classification::ExecutedExists,
    },
    Rule {
        file_table: Some(false),
        execution: Some(true),
        link: None,
        label: Classification::ExecutedButDeleted,
    },
    Rule {
        file_table: Some(false),
        execution: None,
        link: Some(true),
        label: Classification::AccessedPossiblyDeleted,
    },
    Rule {
        file_table: Some(true),
        execution: Some(false),
        link: Some(true),
        label: Classification::AccessedNotExecuted,
    },
];

/// Assign exactly one classification from the presence flags. Total: every
/// flag combination yields a label.
pub fn classify(file_table: bool, execution: bool, link: bool) -> Classification {
    CLASSIFICATION_RULES
        .iter()
        .find(|rule| rule.matches(file_table, execution, link))
        .map(|rule| rule.label)
        .unwrap_or(Classification::Unknown)
}
