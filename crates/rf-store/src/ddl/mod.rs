//! Versioned DDL for the artifact store, compiled into the binary.
//!
//! Scripts are plain `.sql` files next to this module, pulled in with
//! `include_str!` so a deployed `rf` binary never depends on files on disk.
//! Append new scripts to [`MIGRATIONS`] with the next version number; never
//! edit a shipped script, since its version is already recorded in existing
//! store files.

/// One versioned DDL script.
pub struct Migration {
    /// 1-based version; must be strictly increasing across [`MIGRATIONS`]
    pub version: i32,
    /// The script body
    pub sql: &'static str,
}

/// Every script this binary knows, oldest first.
pub static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    sql: include_str!("v001_initial.sql"),
}];
