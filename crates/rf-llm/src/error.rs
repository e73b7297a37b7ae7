//! Error types for rf-llm

use thiserror::Error;

/// Generation backend errors
#[derive(Error, Debug)]
pub enum LlmError {
    /// Backend still failing after the retry budget was spent (L001).
    /// The run aborts; resubmitting the same rule input is safe.
    #[error("[L001] Generation backend unavailable after {attempts} attempts: {message}")]
    BackendUnavailable { attempts: u32, message: String },

    /// Non-retryable request failure, e.g. 4xx status (L002)
    #[error("[L002] Generation request failed: {message}")]
    RequestFailed { message: String },

    /// Response body did not match the backend's wire format (L003)
    #[error("[L003] Malformed backend response: {message}")]
    InvalidResponse { message: String },
}

/// Result type alias for LlmError
pub type LlmResult<T> = Result<T, LlmError>;
