//! rf-parse - Output parsing and validation for Ruleforge
//!
//! The single chokepoint between untyped backend text and the pipeline's
//! typed artifacts. Violations are rejected, never repaired, so the
//! orchestrator decides whether to regenerate or abort.

pub mod error;
pub mod sql;
pub mod testcase;

pub use error::{ParseError, ParseResult};
pub use sql::validate_sql;
pub use testcase::parse_test_case;
