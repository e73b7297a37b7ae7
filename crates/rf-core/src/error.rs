//! Error types for rf-core

use thiserror::Error;

/// Core error type for Ruleforge
#[derive(Error, Debug)]
pub enum CoreError {
    /// E001: Configuration file not found
    #[error("[E001] Config file not found: {path}")]
    ConfigNotFound { path: String },

    /// E002: Failed to parse configuration file
    #[error("[E002] Failed to parse config: {message}")]
    ConfigParseError { message: String },

    /// E003: Invalid configuration value
    #[error("[E003] Invalid config: {message}")]
    ConfigInvalid { message: String },

    /// E004: Rule input rejected before any generation happens
    #[error("[E004] Invalid rule input: {reason}")]
    InvalidRuleInput { reason: String },

    /// E005: Failed to parse a rules file
    #[error("[E005] Failed to parse rules file {path}: {message}")]
    RulesParseError { path: String, message: String },

    /// E006: IO error
    #[error("[E006] IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CoreError
pub type CoreResult<T> = Result<T, CoreError>;
