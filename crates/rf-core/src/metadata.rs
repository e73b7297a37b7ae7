//! Table metadata types and the provider seam.
//!
//! Metadata is consumed, not owned, by the pipeline: a [`MetadataProvider`]
//! supplies column definitions for a target table so prompts can be more
//! precise. An empty mapping means "no metadata" and never blocks a run.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Role a column plays in its table's key structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum KeyRole {
    /// Not part of any key
    #[default]
    None,
    /// Member of the primary key
    PrimaryKey,
    /// Member of a foreign key
    ForeignKey,
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyRole::None => write!(f, "none"),
            KeyRole::PrimaryKey => write!(f, "primary key"),
            KeyRole::ForeignKey => write!(f, "foreign key"),
        }
    }
}

/// Definition of a single column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMeta {
    /// Declared SQL type, e.g. `VARCHAR`, `BIGINT`
    #[serde(rename = "type")]
    pub data_type: String,

    /// Whether the column accepts NULL
    #[serde(default)]
    pub nullable: bool,

    /// Key membership
    #[serde(default)]
    pub key_role: KeyRole,
}

/// Column name -> definition for one table.
///
/// `BTreeMap` keeps rendering order stable so prompts are deterministic.
pub type TableMetadata = BTreeMap<String, ColumnMeta>;

/// Supplies column definitions for a target table.
///
/// Implementations return an empty mapping when the table is unknown or the
/// catalog is unavailable. Absence lowers prompt fidelity but never fails
/// the run.
pub trait MetadataProvider {
    /// Column definitions for `table`, or an empty mapping if unavailable.
    fn table_metadata(&self, table: &str) -> TableMetadata;
}

/// Render one table's metadata as a schema block line set.
///
/// Format: `column_name (TYPE, NOT NULL, primary key)` one per line, matching
/// the schema blocks embedded in generation prompts.
pub fn describe_table(table: &str, columns: &TableMetadata) -> String {
    let mut out = format!("table {}:", table);
    for (name, meta) in columns {
        out.push_str("\n  ");
        out.push_str(name);
        out.push_str(" (");
        out.push_str(&meta.data_type);
        out.push_str(if meta.nullable { ", NULL" } else { ", NOT NULL" });
        if meta.key_role != KeyRole::None {
            out.push_str(", ");
            out.push_str(&meta.key_role.to_string());
        }
        out.push(')');
    }
    out
}
