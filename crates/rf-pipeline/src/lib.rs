//! rf-pipeline - Pipeline orchestrator for Ruleforge
//!
//! Walks each rule input through a strictly sequential state machine:
//! compose, generate and validate the test case, generate and validate the
//! SQL, then persist. Nothing is written on abort, and failures are local
//! to one rule input.

pub mod error;
pub mod pipeline;
pub mod stage;

pub use error::{PipelineError, PipelineResult};
pub use pipeline::{Pipeline, PipelineOptions, PersistedArtifact, RunOutcome};
pub use stage::Stage;
