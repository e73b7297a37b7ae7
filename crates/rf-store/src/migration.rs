//! Store schema migrations.
//!
//! Every `open` walks the embedded DDL scripts and applies the ones whose
//! version is above the recorded high-water mark, so a store file created
//! by an older binary upgrades in place on first contact.

use crate::ddl::MIGRATIONS;
use crate::error::{StoreError, StoreResult};
use duckdb::Connection;

/// High-water mark of applied migrations, 0 for a fresh database.
///
/// Bootstraps the `rf` schema and the version table on the way, since the
/// mark lives in the same schema it tracks.
fn applied_version(conn: &Connection) -> StoreResult<i32> {
    conn.execute_batch(
        "CREATE SCHEMA IF NOT EXISTS rf;
         CREATE TABLE IF NOT EXISTS rf.schema_version (
             version    INTEGER NOT NULL,
             applied_at TIMESTAMP NOT NULL DEFAULT now()
         );",
    )
    .map_err(|e| StoreError::MigrationError(format!("failed to bootstrap version table: {e}")))?;

    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM rf.schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| StoreError::MigrationError(format!("failed to read schema version: {e}")))
}

/// Apply every migration newer than the recorded version.
pub fn run_migrations(conn: &Connection) -> StoreResult<()> {
    let applied = applied_version(conn)?;

    for migration in MIGRATIONS.iter().filter(|m| m.version > applied) {
        log::debug!("applying store migration v{:03}", migration.version);

        conn.execute_batch(migration.sql).map_err(|e| {
            StoreError::MigrationError(format!("migration v{:03} failed: {e}", migration.version))
        })?;
        conn.execute(
            "INSERT INTO rf.schema_version (version) VALUES (?)",
            duckdb::params![migration.version],
        )
        .map_err(|e| {
            StoreError::MigrationError(format!(
                "failed to record migration v{:03}: {e}",
                migration.version
            ))
        })?;
    }
    Ok(())
}
