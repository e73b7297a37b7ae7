//! rf-llm - Generation client for Ruleforge
//!
//! Sends composed prompts to a text-generation backend and returns raw text.
//! Owns the transport retry/timeout policy; content-level validation belongs
//! to rf-parse.

pub mod client;
pub mod error;

pub use client::{GenMode, GenerationBackend, OllamaBackend};
pub use error::{LlmError, LlmResult};
