//! The per-rule orchestration walk.

use crate::error::{PipelineError, PipelineResult};
use rf_core::artifact::{GeneratedSqlScript, GeneratedTestCase, TestArtifact};
use rf_core::config::GenerationConfig;
use rf_core::rule::RuleInput;
use rf_llm::{GenMode, GenerationBackend, LlmError};
use rf_parse::error::{ParseError, ParseResult};
use rf_prompt::PromptComposer;
use rf_store::ArtifactDb;

/// Pipeline behaviour knobs.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// How many fresh generations a validation failure may trigger before
    /// the run aborts (0 = single attempt)
    pub validation_retries: u32,

    /// Priority label written on new artifacts
    pub default_priority: String,

    /// Status label written on new artifacts
    pub default_status: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self::from(&GenerationConfig::default())
    }
}

impl From<&GenerationConfig> for PipelineOptions {
    fn from(config: &GenerationConfig) -> Self {
        Self {
            validation_retries: config.validation_retries,
            default_priority: config.default_priority.clone(),
            default_status: config.default_status.clone(),
        }
    }
}

/// Everything a completed run produced: the durable row plus the transient
/// generated halves for display.
#[derive(Debug, Clone)]
pub struct PersistedArtifact {
    pub artifact: TestArtifact,
    pub test_case: GeneratedTestCase,
    pub sql: GeneratedSqlScript,
}

/// Per-rule outcome from [`Pipeline::run_all`].
pub enum RunOutcome {
    /// Artifact persisted
    Persisted(Box<PersistedArtifact>),
    /// Run aborted; `index` is the rule's position in the input slice
    Failed { index: usize, error: PipelineError },
}

/// Failure of one generate-then-validate half.
enum HalfError {
    Generation(LlmError),
    Validation(ParseError),
}

/// Orchestrates rule inputs through compose, generate, validate, persist.
pub struct Pipeline<'a> {
    backend: &'a dyn GenerationBackend,
    store: &'a ArtifactDb,
    composer: PromptComposer,
    options: PipelineOptions,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline over a generation backend and an open store.
    pub fn new(
        backend: &'a dyn GenerationBackend,
        store: &'a ArtifactDb,
        options: PipelineOptions,
    ) -> Self {
        Self {
            backend,
            store,
            composer: PromptComposer::new(),
            options,
        }
    }

    /// Run one rule input to a persisted artifact.
    ///
    /// Strictly sequential: the SQL half only starts after the test-case
    /// half validated. On any error nothing is written, and resubmitting
    /// the identical rule input with the same `sequence` is idempotent
    /// (the upsert key is positional).
    pub async fn run(
        &self,
        project_id: i64,
        rule: &RuleInput,
        sequence: usize,
    ) -> PipelineResult<PersistedArtifact> {
        let test_case_prompt = self.composer.compose_test_case(rule)?;
        let sql_prompt = self.composer.compose_sql(rule)?;

        let test_case = self
            .generate_half(&test_case_prompt, GenMode::TestCase, rf_parse::parse_test_case)
            .await
            .map_err(|e| match e {
                HalfError::Generation(err) => PipelineError::GenerateTestCase(err),
                HalfError::Validation(err) => PipelineError::ValidateTestCase(err),
            })?;

        let mode = rule.sql_mode();
        let sql = self
            .generate_half(&sql_prompt, GenMode::Sql, |raw| {
                rf_parse::validate_sql(raw, &mode)
            })
            .await
            .map_err(|e| match e {
                HalfError::Generation(err) => PipelineError::GenerateSql(err),
                HalfError::Validation(err) => PipelineError::ValidateSql(err),
            })?;

        let artifact = TestArtifact {
            project_id,
            test_case_id: format!("TC-{sequence:03}"),
            data_field: rule.field.clone(),
            rule_description: test_case.description.clone(),
            sql_script: sql.sql.clone(),
            priority: self.options.default_priority.clone(),
            status: self.options.default_status.clone(),
            execution_date: None,
            requirement_id: format!("BR-{sequence:03}"),
        };

        self.store.upsert_artifact(&artifact)?;

        Ok(PersistedArtifact {
            artifact,
            test_case,
            sql,
        })
    }

    /// Run every rule with per-rule isolation: a failed rule never blocks
    /// its siblings, and each artifact becomes visible as soon as its own
    /// run completes.
    pub async fn run_all(&self, project_id: i64, rules: &[RuleInput]) -> Vec<RunOutcome> {
        let mut outcomes = Vec::with_capacity(rules.len());

        for (index, rule) in rules.iter().enumerate() {
            match self.run(project_id, rule, index + 1).await {
                Ok(persisted) => outcomes.push(RunOutcome::Persisted(Box::new(persisted))),
                Err(error) => {
                    log::error!(
                        "rule {} ({}.{}) aborted at stage '{}': {}",
                        index + 1,
                        rule.table,
                        rule.field,
                        error.stage(),
                        error
                    );
                    outcomes.push(RunOutcome::Failed { index, error });
                }
            }
        }

        outcomes
    }

    /// One generate-then-validate half with a bounded regeneration budget.
    ///
    /// Backend failures abort immediately (the client already spent its
    /// transport retries); validation failures trigger a fresh generation
    /// until the budget runs out. Offending raw text is logged for
    /// diagnosis, never repaired.
    async fn generate_half<T>(
        &self,
        prompt: &str,
        mode: GenMode,
        parse: impl Fn(&str) -> ParseResult<T>,
    ) -> Result<T, HalfError> {
        let attempts = self.options.validation_retries + 1;
        let mut last_err = None;

        for attempt in 1..=attempts {
            let raw = self
                .backend
                .generate(prompt, mode)
                .await
                .map_err(HalfError::Generation)?;

            match parse(&raw) {
                Ok(value) => return Ok(value),
                Err(err) => {
                    log::warn!(
                        "{} output rejected (attempt {}/{}): {}; raw output: {:?}",
                        mode,
                        attempt,
                        attempts,
                        err,
                        raw
                    );
                    last_err = Some(err);
                }
            }
        }

        // attempts >= 1, so last_err is always set here.
        Err(HalfError::Validation(last_err.unwrap_or(
            ParseError::EmptyOutput,
        )))
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
