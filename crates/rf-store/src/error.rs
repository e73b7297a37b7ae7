//! Error types for the artifact store.

use thiserror::Error;

/// Artifact store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to open or create the store database (A001).
    #[error("[A001] Artifact store connection failed: {0}")]
    ConnectionError(String),

    /// Schema migration failed (A002).
    #[error("[A002] Artifact store migration failed: {0}")]
    MigrationError(String),

    /// SQL execution error inside the store (A003).
    #[error("[A003] Artifact store query failed: {0}")]
    QueryError(String),

    /// Transaction management error (A004).
    #[error("[A004] Artifact store transaction failed: {0}")]
    TransactionError(String),

    /// No project row matches the given identifier (A005).
    #[error("[A005] Project not found: {project_id}")]
    ProjectNotFound { project_id: i64 },

    /// The constraint set rejected the write (A006).
    #[error("[A006] Integrity violation: {0}")]
    IntegrityViolation(String),
}

/// Result type alias for [`StoreError`].
pub type StoreResult<T> = Result<T, StoreError>;

impl From<duckdb::Error> for StoreError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants, so constraint
        // rejections are classified by message text.
        let msg = err.to_string();
        if msg.contains("Constraint Error") || msg.contains("violates") {
            StoreError::IntegrityViolation(msg)
        } else {
            StoreError::QueryError(msg)
        }
    }
}
