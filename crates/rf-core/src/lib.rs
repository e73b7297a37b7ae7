//! rf-core - Core library for Ruleforge
//!
//! Shared types for the artifact generation pipeline: rule inputs, generated
//! artifact types, the category enumeration, table metadata, and project
//! configuration.

pub mod artifact;
pub mod config;
pub mod error;
pub mod metadata;
pub mod rule;
pub mod text;

pub use artifact::{GeneratedSqlScript, GeneratedTestCase, TestArtifact, TestCategory};
pub use config::Config;
pub use error::{CoreError, CoreResult};
pub use metadata::{ColumnMeta, KeyRole, MetadataProvider, TableMetadata};
pub use rule::{RuleInput, RuleSet, SqlMode};
