//! CLI command implementations

pub(crate) mod artifacts;
pub(crate) mod common;
pub(crate) mod generate;
pub(crate) mod project;
