//! Catalog-backed metadata provider.
//!
//! Reads column definitions for user tables out of the store database's
//! catalog so prompts can embed precise schema blocks. A missing table
//! yields an empty mapping, never an error.

use crate::connection::ArtifactDb;
use crate::error::StoreResult;
use rf_core::metadata::{ColumnMeta, KeyRole, MetadataProvider, TableMetadata};

impl ArtifactDb {
    fn table_metadata_inner(&self, table: &str) -> StoreResult<TableMetadata> {
        let mut metadata = TableMetadata::new();

        let mut stmt = self.conn().prepare(
            "SELECT column_name, data_type, is_nullable
             FROM information_schema.columns
             WHERE table_name = ? AND table_schema = 'main'
             ORDER BY ordinal_position",
        )?;
        let columns = stmt
            .query_map(duckdb::params![table], |row| {
                let name: String = row.get(0)?;
                let data_type: String = row.get(1)?;
                let is_nullable: String = row.get(2)?;
                Ok((name, data_type, is_nullable == "YES"))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        for (name, data_type, nullable) in columns {
            metadata.insert(
                name,
                ColumnMeta {
                    data_type,
                    nullable,
                    key_role: KeyRole::None,
                },
            );
        }

        if metadata.is_empty() {
            return Ok(metadata);
        }

        // duckdb_constraints() exposes constraint_column_names as LIST(VARCHAR);
        // cast to VARCHAR gives "[col_a, col_b]" for membership parsing.
        let mut stmt = self.conn().prepare(
            "SELECT constraint_type, constraint_column_names::VARCHAR
             FROM duckdb_constraints()
             WHERE table_name = ? AND schema_name = 'main'",
        )?;
        let constraints = stmt
            .query_map(duckdb::params![table], |row| {
                let kind: String = row.get(0)?;
                let columns: String = row.get(1)?;
                Ok((kind, columns))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        for (kind, column_list) in constraints {
            let role = match kind.as_str() {
                "PRIMARY KEY" => KeyRole::PrimaryKey,
                "FOREIGN KEY" => KeyRole::ForeignKey,
                _ => continue,
            };
            for column in parse_column_list(&column_list) {
                if let Some(meta) = metadata.get_mut(&column) {
                    meta.key_role = role;
                }
            }
        }

        Ok(metadata)
    }
}

/// Parse `"[col_a, col_b]"` into column names.
fn parse_column_list(list: &str) -> Vec<String> {
    list.trim()
        .trim_start_matches('[')
        .trim_end_matches(']')
        .split(',')
        .map(|s| s.trim().trim_matches('\'').to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl MetadataProvider for ArtifactDb {
    fn table_metadata(&self, table: &str) -> TableMetadata {
        match self.table_metadata_inner(table) {
            Ok(metadata) => metadata,
            Err(e) => {
                log::warn!("metadata lookup failed for {table:?}: {e}");
                TableMetadata::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_for_user_table() {
        let db = ArtifactDb::open_memory().unwrap();
        db.conn()
            .execute_batch(
                "CREATE TABLE customers (
                     customer_id BIGINT PRIMARY KEY,
                     email VARCHAR,
                     created_at TIMESTAMP NOT NULL
                 );",
            )
            .unwrap();

        let metadata = db.table_metadata("customers");
        assert_eq!(metadata.len(), 3);

        let id = &metadata["customer_id"];
        assert_eq!(id.key_role, KeyRole::PrimaryKey);
        assert!(!id.nullable);

        let email = &metadata["email"];
        assert_eq!(email.key_role, KeyRole::None);
        assert!(email.nullable);

        assert!(!metadata["created_at"].nullable);
    }

    #[test]
    fn test_unknown_table_yields_empty_mapping() {
        let db = ArtifactDb::open_memory().unwrap();
        assert!(db.table_metadata("nonexistent").is_empty());
    }

    #[test]
    fn test_parse_column_list() {
        assert_eq!(parse_column_list("[a, b]"), vec!["a", "b"]);
        assert_eq!(parse_column_list("[customer_id]"), vec!["customer_id"]);
        assert!(parse_column_list("[]").is_empty());
    }
}
