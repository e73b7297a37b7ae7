//! Project rows: insert, list, delete with manual cascade.

use crate::connection::ArtifactDb;
use crate::error::{StoreError, StoreResult};

/// One row of `rf.projects`.
#[derive(Debug, Clone)]
pub struct ProjectRow {
    pub project_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub created_at: String,
}

impl ArtifactDb {
    /// Insert a project and return its generated id.
    pub fn insert_project(&self, name: &str, description: Option<&str>) -> StoreResult<i64> {
        let project_id: i64 = self
            .conn()
            .query_row(
                "INSERT INTO rf.projects (name, description) VALUES (?, ?) RETURNING project_id",
                duckdb::params![name, description],
                |row| row.get(0),
            )
            .map_err(StoreError::from)?;

        log::info!("project created: id={project_id} name={name:?}");
        Ok(project_id)
    }

    /// All projects, newest first.
    pub fn fetch_projects(&self) -> StoreResult<Vec<ProjectRow>> {
        let mut stmt = self.conn().prepare(
            "SELECT project_id, name, description, created_at::VARCHAR
             FROM rf.projects ORDER BY created_at DESC, project_id DESC",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok(ProjectRow {
                    project_id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                    created_at: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Whether a project row exists.
    pub fn project_exists(&self, project_id: i64) -> StoreResult<bool> {
        let count: i64 = self.conn().query_row(
            "SELECT COUNT(*) FROM rf.projects WHERE project_id = ?",
            duckdb::params![project_id],
            |row| row.get(0),
        )?;
        Ok(count > 0)
    }

    /// Delete a project and every artifact it owns.
    ///
    /// DuckDB does not support `ON DELETE CASCADE`, so children are deleted
    /// first inside one transaction.
    pub fn delete_project(&self, project_id: i64) -> StoreResult<()> {
        if !self.project_exists(project_id)? {
            return Err(StoreError::ProjectNotFound { project_id });
        }

        self.transaction(|conn| {
            conn.execute(
                "DELETE FROM rf.test_artifacts WHERE project_id = ?",
                duckdb::params![project_id],
            )?;
            conn.execute(
                "DELETE FROM rf.projects WHERE project_id = ?",
                duckdb::params![project_id],
            )?;
            Ok(())
        })?;

        log::info!("project deleted: id={project_id}");
        Ok(())
    }
}
