//! rf-prompt - Prompt composition for Ruleforge
//!
//! Builds bounded-format prompts for the two artifact kinds (test-case
//! description and violation-detection SQL) from a rule input and optional
//! table metadata. Pure transformation: no IO, no backend calls.

pub mod composer;
pub mod error;
mod templates;

pub use composer::PromptComposer;
pub use error::{PromptError, PromptResult};
