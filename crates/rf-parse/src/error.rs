//! Error types for rf-parse

use thiserror::Error;

/// Output validation errors
#[derive(Error, Debug)]
pub enum ParseError {
    /// Backend returned no usable text (V001)
    #[error("[V001] Generation output is empty")]
    EmptyOutput,

    /// Output structure could not be parsed (V002)
    #[error("[V002] Malformed output: {reason}")]
    MalformedOutput { reason: String },

    /// Category is not a member of the fixed enumeration (V003)
    #[error("[V003] Invalid category '{found}': expected one of Accuracy, Validity, Completeness, Consistency, Uniqueness, Timeliness")]
    InvalidCategory { found: String },

    /// Description below the 25-word minimum (V004)
    #[error("[V004] Description too short: {words} words (minimum 25)")]
    DescriptionTooShort { words: usize },

    /// More than one SQL statement detected (V005)
    #[error("[V005] Expected a single SQL statement, found {count}")]
    MultiStatement { count: usize },

    /// Structural rule violated for the active SQL mode (V006)
    #[error("[V006] SQL output used {detail} in {mode} mode")]
    ForbiddenConstruct { mode: &'static str, detail: String },

    /// SQL could not be parsed at all (V007)
    #[error("[V007] SQL parse error: {message}")]
    SqlParseError { message: String },
}

/// Result type alias for ParseError
pub type ParseResult<T> = Result<T, ParseError>;
