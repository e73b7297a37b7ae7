//! Pipeline stages for one rule input.

use std::fmt;

/// Sequential stages of a single rule run.
///
/// The SQL half only starts after the test-case half validated, so an
/// aborted SQL step never discards a half-built row: nothing is persisted
/// until both halves are complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Prompts composed from the rule input
    Composed,
    /// Raw test-case text received from the backend
    GeneratedTestCase,
    /// Test case parsed and validated
    ValidatedTestCase,
    /// Raw SQL text received from the backend
    GeneratedSql,
    /// SQL parsed and validated
    ValidatedSql,
    /// Artifact row written to the store
    Persisted,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Composed => "compose",
            Stage::GeneratedTestCase => "generate test case",
            Stage::ValidatedTestCase => "validate test case",
            Stage::GeneratedSql => "generate sql",
            Stage::ValidatedSql => "validate sql",
            Stage::Persisted => "persist",
        };
        write!(f, "{name}")
    }
}
