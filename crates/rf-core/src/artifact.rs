//! Generated artifact types and the fixed category enumeration.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed test-case classification set.
///
/// The validator matches backend output against these names case-sensitively;
/// anything else is a validation failure, never coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestCategory {
    Accuracy,
    Validity,
    Completeness,
    Consistency,
    Uniqueness,
    Timeliness,
}

impl TestCategory {
    /// All members of the canonical set, in declaration order.
    pub const ALL: [TestCategory; 6] = [
        TestCategory::Accuracy,
        TestCategory::Validity,
        TestCategory::Completeness,
        TestCategory::Consistency,
        TestCategory::Uniqueness,
        TestCategory::Timeliness,
    ];

    /// Canonical name as stored and matched.
    pub fn as_str(&self) -> &'static str {
        match self {
            TestCategory::Accuracy => "Accuracy",
            TestCategory::Validity => "Validity",
            TestCategory::Completeness => "Completeness",
            TestCategory::Consistency => "Consistency",
            TestCategory::Uniqueness => "Uniqueness",
            TestCategory::Timeliness => "Timeliness",
        }
    }
}

impl fmt::Display for TestCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TestCategory {
    type Err = ();

    /// Case-sensitive match against the canonical set.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TestCategory::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or(())
    }
}

/// Structured test case parsed from backend output.
///
/// Transient: exists only within one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedTestCase {
    /// Business-readable title, under ten words
    pub title: String,

    /// Single sentence of at least 25 words covering the validated condition,
    /// its business importance, and failure impact
    pub description: String,

    /// Classification drawn from the fixed set
    pub category: TestCategory,
}

/// SQL template branch kind, recorded on the validated script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SqlScriptKind {
    /// Single-table predicate
    Simple,
    /// Explicit JOIN across the tables named in the join condition
    Join,
}

/// Validated violation-detection query parsed from backend output.
///
/// Transient: exists only within one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedSqlScript {
    /// Single raw SQL SELECT statement, free of comments and markup
    pub sql: String,

    /// Which template branch produced it
    pub kind: SqlScriptKind,
}

/// Durable artifact row persisted under a project.
///
/// Keyed on `(project_id, test_case_id)`; re-runs targeting the same external
/// identifier replace the whole row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestArtifact {
    /// Owning project
    pub project_id: i64,

    /// External test-case identifier, e.g. `TC-001`
    pub test_case_id: String,

    /// Column the rule validates
    pub data_field: String,

    /// Business-readable rule description (the generated sentence)
    pub rule_description: String,

    /// Violation-detection SQL
    pub sql_script: String,

    /// Execution priority label
    pub priority: String,

    /// Workflow status label
    pub status: String,

    /// Date of last execution, if any
    pub execution_date: Option<NaiveDate>,

    /// Traceability link to a business requirement, e.g. `BR-001`
    pub requirement_id: String,
}
