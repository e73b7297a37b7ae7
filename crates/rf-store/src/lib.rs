//! rf-store - Artifact store for Ruleforge.
//!
//! DuckDB-backed persistence for projects and their test artifacts, plus a
//! catalog-backed metadata provider. Upserts are transactional and keyed on
//! `(project_id, test_case_id)`; deleting a project cascades to its
//! artifacts inside the store, never in the orchestrator.

pub mod artifact;
pub mod connection;
pub mod ddl;
pub mod error;
pub mod metadata;
pub mod migration;
pub mod project;

pub use connection::ArtifactDb;
pub use error::{StoreError, StoreResult};
pub use project::ProjectRow;
