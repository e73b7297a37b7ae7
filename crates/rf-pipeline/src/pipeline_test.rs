use super::*;
use crate::stage::Stage;
use async_trait::async_trait;
use rf_llm::LlmResult;
use rf_parse::ParseError;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Mutex;

/// Backend that replays a fixed script of responses in order.
struct ScriptedBackend {
    responses: Mutex<VecDeque<LlmResult<String>>>,
}

impl ScriptedBackend {
    fn new(responses: Vec<LlmResult<String>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
        }
    }
}

#[async_trait]
impl GenerationBackend for ScriptedBackend {
    async fn generate(&self, _prompt: &str, _mode: GenMode) -> LlmResult<String> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(LlmError::RequestFailed {
                    message: "script exhausted".to_string(),
                })
            })
    }
}

const VALID_TEST_CASE: &str = r#"{
  "title": "Null email check on customers",
  "description": "Verify that every customer record migrated from the legacy system carries a non-null email address, since downstream billing and notification workflows depend on being able to contact each customer.",
  "category": "Completeness"
}"#;

const SIMPLE_SQL: &str = "SELECT * FROM customers WHERE email IS NULL";

const JOIN_SQL: &str = "SELECT orders.order_id FROM orders \
    LEFT JOIN customers ON orders.customer_id = customers.customer_id \
    WHERE customers.customer_id IS NULL";

fn simple_rule() -> RuleInput {
    RuleInput {
        table: "customers".to_string(),
        field: "email".to_string(),
        rule: "must not be null".to_string(),
        join_condition: None,
        metadata: BTreeMap::new(),
    }
}

fn join_rule() -> RuleInput {
    RuleInput {
        table: "orders".to_string(),
        field: "customer_id".to_string(),
        rule: "must match an existing customer".to_string(),
        join_condition: Some("orders.customer_id = customers.customer_id".to_string()),
        metadata: BTreeMap::new(),
    }
}

fn options(validation_retries: u32) -> PipelineOptions {
    PipelineOptions {
        validation_retries,
        ..PipelineOptions::default()
    }
}

fn store_with_project() -> (ArtifactDb, i64) {
    let db = ArtifactDb::open_memory().unwrap();
    let project_id = db.insert_project("migration_qa", None).unwrap();
    (db, project_id)
}

#[tokio::test]
async fn test_simple_rule_persists_artifact() {
    let (db, project_id) = store_with_project();
    let backend = ScriptedBackend::new(vec![
        Ok(VALID_TEST_CASE.to_string()),
        Ok(SIMPLE_SQL.to_string()),
    ]);
    let pipeline = Pipeline::new(&backend, &db, options(0));

    let persisted = pipeline.run(project_id, &simple_rule(), 1).await.unwrap();

    assert_eq!(persisted.artifact.test_case_id, "TC-001");
    assert_eq!(persisted.artifact.requirement_id, "BR-001");
    assert_eq!(persisted.artifact.data_field, "email");
    assert_eq!(persisted.artifact.rule_description, persisted.test_case.description);
    assert_eq!(persisted.artifact.priority, "Medium");
    assert_eq!(persisted.artifact.status, "Pending");
    assert_eq!(persisted.artifact.execution_date, None);

    let rows = db.fetch_artifacts(project_id).unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].sql_script, SIMPLE_SQL);
}

#[tokio::test]
async fn test_join_rule_persists_artifact() {
    let (db, project_id) = store_with_project();
    let backend = ScriptedBackend::new(vec![
        Ok(VALID_TEST_CASE.to_string()),
        Ok(JOIN_SQL.to_string()),
    ]);
    let pipeline = Pipeline::new(&backend, &db, options(0));

    let persisted = pipeline.run(project_id, &join_rule(), 3).await.unwrap();

    assert_eq!(persisted.artifact.test_case_id, "TC-003");
    assert_eq!(persisted.artifact.requirement_id, "BR-003");
    assert!(persisted.sql.sql.contains("LEFT JOIN"));
    assert_eq!(db.count_artifacts(project_id).unwrap(), 1);
}

#[tokio::test]
async fn test_conversational_test_case_aborts_without_write() {
    let (db, project_id) = store_with_project();
    let backend = ScriptedBackend::new(vec![Ok(
        "Sure! Here is a test case for the email rule you asked about.".to_string(),
    )]);
    let pipeline = Pipeline::new(&backend, &db, options(0));

    let err = pipeline.run(project_id, &simple_rule(), 1).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::ValidateTestCase(ParseError::MalformedOutput { .. })
    ));
    assert_eq!(err.stage(), Stage::ValidatedTestCase);
    assert_eq!(db.count_artifacts(project_id).unwrap(), 0);
}

#[tokio::test]
async fn test_backend_outage_then_clean_resubmission() {
    let (db, project_id) = store_with_project();

    let down = ScriptedBackend::new(vec![Err(LlmError::BackendUnavailable {
        attempts: 3,
        message: "connection refused".to_string(),
    })]);
    let pipeline = Pipeline::new(&down, &db, options(0));
    let err = pipeline.run(project_id, &simple_rule(), 1).await.unwrap_err();
    assert!(matches!(err, PipelineError::GenerateTestCase(_)));
    assert_eq!(db.count_artifacts(project_id).unwrap(), 0);

    // Same rule input, same sequence, healthy backend: exactly one row.
    let healthy = ScriptedBackend::new(vec![
        Ok(VALID_TEST_CASE.to_string()),
        Ok(SIMPLE_SQL.to_string()),
    ]);
    let pipeline = Pipeline::new(&healthy, &db, options(0));
    pipeline.run(project_id, &simple_rule(), 1).await.unwrap();

    assert_eq!(db.count_artifacts(project_id).unwrap(), 1);
}

#[tokio::test]
async fn test_validation_failure_consumes_retry_then_succeeds() {
    let (db, project_id) = store_with_project();
    let backend = ScriptedBackend::new(vec![
        Ok("not json at all".to_string()),
        Ok(VALID_TEST_CASE.to_string()),
        Ok(SIMPLE_SQL.to_string()),
    ]);
    let pipeline = Pipeline::new(&backend, &db, options(1));

    let persisted = pipeline.run(project_id, &simple_rule(), 1).await.unwrap();

    assert_eq!(persisted.artifact.test_case_id, "TC-001");
    assert_eq!(db.count_artifacts(project_id).unwrap(), 1);
}

#[tokio::test]
async fn test_join_sql_in_simple_mode_rejected() {
    let (db, project_id) = store_with_project();
    let backend = ScriptedBackend::new(vec![
        Ok(VALID_TEST_CASE.to_string()),
        Ok(JOIN_SQL.to_string()),
    ]);
    let pipeline = Pipeline::new(&backend, &db, options(0));

    let err = pipeline.run(project_id, &simple_rule(), 1).await.unwrap_err();

    assert!(matches!(
        err,
        PipelineError::ValidateSql(ParseError::ForbiddenConstruct { mode: "simple", .. })
    ));
    assert_eq!(err.stage(), Stage::ValidatedSql);
    assert_eq!(db.count_artifacts(project_id).unwrap(), 0);
}

#[tokio::test]
async fn test_unknown_project_surfaces_persist_error() {
    let db = ArtifactDb::open_memory().unwrap();
    let backend = ScriptedBackend::new(vec![
        Ok(VALID_TEST_CASE.to_string()),
        Ok(SIMPLE_SQL.to_string()),
    ]);
    let pipeline = Pipeline::new(&backend, &db, options(0));

    let err = pipeline.run(99, &simple_rule(), 1).await.unwrap_err();
    assert!(matches!(err, PipelineError::Persist(_)));
    assert_eq!(err.stage(), Stage::Persisted);
}

#[tokio::test]
async fn test_run_all_isolates_failures() {
    let (db, project_id) = store_with_project();
    // Rule 1 gets conversational text, rule 2 a valid pair.
    let backend = ScriptedBackend::new(vec![
        Ok("I'd be happy to help with that rule.".to_string()),
        Ok(VALID_TEST_CASE.to_string()),
        Ok(JOIN_SQL.to_string()),
    ]);
    let pipeline = Pipeline::new(&backend, &db, options(0));

    let outcomes = pipeline
        .run_all(project_id, &[simple_rule(), join_rule()])
        .await;

    assert_eq!(outcomes.len(), 2);
    assert!(matches!(
        outcomes[0],
        RunOutcome::Failed { index: 0, .. }
    ));
    match &outcomes[1] {
        RunOutcome::Persisted(persisted) => {
            assert_eq!(persisted.artifact.test_case_id, "TC-002");
            assert_eq!(persisted.artifact.requirement_id, "BR-002");
        }
        RunOutcome::Failed { error, .. } => panic!("rule 2 failed: {error}"),
    }
    assert_eq!(db.count_artifacts(project_id).unwrap(), 1);
}

#[tokio::test]
async fn test_invalid_rule_rejected_at_compose() {
    let (db, project_id) = store_with_project();
    let backend = ScriptedBackend::new(vec![]);
    let pipeline = Pipeline::new(&backend, &db, options(0));

    let mut rule = simple_rule();
    rule.table = String::new();

    let err = pipeline.run(project_id, &rule, 1).await.unwrap_err();
    assert!(matches!(err, PipelineError::Compose(_)));
    assert_eq!(err.stage(), Stage::Composed);
    assert_eq!(db.count_artifacts(project_id).unwrap(), 0);
}

#[test]
fn test_options_from_generation_config() {
    let config = GenerationConfig::default();
    let options = PipelineOptions::from(&config);
    assert_eq!(options.validation_retries, 1);
    assert_eq!(options.default_priority, "Medium");
    assert_eq!(options.default_status, "Pending");
}
