//! Error types for rf-pipeline

use crate::stage::Stage;
use rf_llm::LlmError;
use rf_parse::ParseError;
use rf_prompt::PromptError;
use rf_store::StoreError;
use thiserror::Error;

/// Pipeline abort: which stage failed and the violated contract.
///
/// Every variant is terminal for its rule input. Nothing was written to the
/// store, and resubmitting the same rule input is safe.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Prompt composition failed (R001)
    #[error("[R001] compose failed: {0}")]
    Compose(#[from] PromptError),

    /// Backend call failed for the test-case prompt (R002)
    #[error("[R002] test case generation failed: {0}")]
    GenerateTestCase(#[source] LlmError),

    /// Test-case output rejected after the regeneration budget (R003)
    #[error("[R003] test case validation failed: {0}")]
    ValidateTestCase(#[source] ParseError),

    /// Backend call failed for the SQL prompt (R004)
    #[error("[R004] sql generation failed: {0}")]
    GenerateSql(#[source] LlmError),

    /// SQL output rejected after the regeneration budget (R005)
    #[error("[R005] sql validation failed: {0}")]
    ValidateSql(#[source] ParseError),

    /// Store upsert failed (R006)
    #[error("[R006] persist failed: {0}")]
    Persist(#[from] StoreError),
}

impl PipelineError {
    /// Stage at which the run aborted.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Compose(_) => Stage::Composed,
            PipelineError::GenerateTestCase(_) => Stage::GeneratedTestCase,
            PipelineError::ValidateTestCase(_) => Stage::ValidatedTestCase,
            PipelineError::GenerateSql(_) => Stage::GeneratedSql,
            PipelineError::ValidateSql(_) => Stage::ValidatedSql,
            PipelineError::Persist(_) => Stage::Persisted,
        }
    }
}

/// Result type alias for PipelineError
pub type PipelineResult<T> = Result<T, PipelineError>;
