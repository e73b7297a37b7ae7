//! Test artifact rows: transactional upsert and project-scoped reads.

use crate::connection::ArtifactDb;
use crate::error::{StoreError, StoreResult};
use chrono::NaiveDate;
use rf_core::artifact::TestArtifact;

impl ArtifactDb {
    /// Insert or replace the artifact keyed on `(project_id, test_case_id)`.
    ///
    /// DELETE + INSERT inside one transaction: concurrent readers see either
    /// the old row or the new row, never a partial mix. A second call with
    /// the same key and a different payload leaves exactly one row holding
    /// the second payload.
    pub fn upsert_artifact(&self, artifact: &TestArtifact) -> StoreResult<()> {
        if !self.project_exists(artifact.project_id)? {
            return Err(StoreError::ProjectNotFound {
                project_id: artifact.project_id,
            });
        }

        self.transaction(|conn| {
            conn.execute(
                "DELETE FROM rf.test_artifacts WHERE project_id = ? AND test_case_id = ?",
                duckdb::params![artifact.project_id, artifact.test_case_id],
            )?;
            conn.execute(
                "INSERT INTO rf.test_artifacts (
                     project_id, test_case_id, data_field, rule_description,
                     sql_script, priority, status, execution_date, requirement_id
                 ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
                duckdb::params![
                    artifact.project_id,
                    artifact.test_case_id,
                    artifact.data_field,
                    artifact.rule_description,
                    artifact.sql_script,
                    artifact.priority,
                    artifact.status,
                    artifact.execution_date.map(|d| d.to_string()),
                    artifact.requirement_id,
                ],
            )?;
            Ok(())
        })?;

        log::info!(
            "artifact upserted: project={} test_case={}",
            artifact.project_id,
            artifact.test_case_id
        );
        Ok(())
    }

    /// All artifacts for a project, in external-id order.
    pub fn fetch_artifacts(&self, project_id: i64) -> StoreResult<Vec<TestArtifact>> {
        let mut stmt = self.conn().prepare(
            "SELECT project_id, test_case_id, data_field, rule_description,
                    sql_script, priority, status, execution_date::VARCHAR, requirement_id
             FROM rf.test_artifacts
             WHERE project_id = ?
             ORDER BY test_case_id",
        )?;

        let rows = stmt
            .query_map(duckdb::params![project_id], |row| {
                let execution_date: Option<String> = row.get(7)?;
                Ok(TestArtifact {
                    project_id: row.get(0)?,
                    test_case_id: row.get(1)?,
                    data_field: row.get(2)?,
                    rule_description: row.get(3)?,
                    sql_script: row.get(4)?,
                    priority: row.get(5)?,
                    status: row.get(6)?,
                    execution_date: execution_date
                        .and_then(|d| d.parse::<NaiveDate>().ok()),
                    requirement_id: row.get(8)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Number of artifacts under a project.
    pub fn count_artifacts(&self, project_id: i64) -> StoreResult<usize> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM rf.test_artifacts WHERE project_id = ?",
            duckdb::params![project_id],
            |row| row.get(0),
        )?;
        Ok(count as usize)
    }
}
