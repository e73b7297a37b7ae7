//! Error types for rf-prompt

use thiserror::Error;

/// Prompt composition errors
#[derive(Error, Debug)]
pub enum PromptError {
    /// Rule input rejected before composition (P001)
    #[error("[P001] Invalid rule input: {reason}")]
    InvalidRuleInput { reason: String },

    /// Template render error (P002)
    #[error("[P002] Prompt render error: {0}")]
    RenderError(String),
}

/// Result type alias for PromptError
pub type PromptResult<T> = Result<T, PromptError>;

impl From<minijinja::Error> for PromptError {
    fn from(err: minijinja::Error) -> Self {
        PromptError::RenderError(err.to_string())
    }
}
