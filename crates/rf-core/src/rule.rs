//! Rule inputs: the declarative unit of work for the pipeline.

use crate::error::{CoreError, CoreResult};
use crate::metadata::TableMetadata;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// One declarative validation rule to be turned into a test artifact.
///
/// `metadata` maps table name -> column definitions for every table the rule
/// references. It is optional: an empty map lowers prompt fidelity but does
/// not block generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuleInput {
    /// Target table the rule applies to
    pub table: String,

    /// Target column within the table
    pub field: String,

    /// Natural-language rule text, e.g. "must not be null"
    pub rule: String,

    /// Natural-language cross-table relationship, e.g.
    /// "orders.customer_id = customers.customer_id"
    #[serde(default)]
    pub join_condition: Option<String>,

    /// Column definitions for referenced tables, keyed by table name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, TableMetadata>,
}

/// SQL template branch, selected once per rule and threaded through both the
/// prompt composer and the output validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlMode {
    /// Single-table predicate, JOIN forbidden
    Simple,
    /// Explicit-JOIN query built around the given join condition
    Joined(String),
}

impl SqlMode {
    /// Short tag for logging and error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlMode::Simple => "simple",
            SqlMode::Joined(_) => "join",
        }
    }
}

impl RuleInput {
    /// Reject rules that cannot produce a meaningful prompt.
    ///
    /// A blank rule text would still render a template, so only table and
    /// field are hard requirements.
    pub fn validate(&self) -> CoreResult<()> {
        if self.table.trim().is_empty() {
            return Err(CoreError::InvalidRuleInput {
                reason: "table name is empty".to_string(),
            });
        }
        if self.field.trim().is_empty() {
            return Err(CoreError::InvalidRuleInput {
                reason: "field name is empty".to_string(),
            });
        }
        Ok(())
    }

    /// Select the SQL template branch for this rule.
    ///
    /// A join condition that is present but blank counts as absent.
    pub fn sql_mode(&self) -> SqlMode {
        match &self.join_condition {
            Some(cond) if !cond.trim().is_empty() => SqlMode::Joined(cond.trim().to_string()),
            _ => SqlMode::Simple,
        }
    }
}

/// A rules file: the batch of rule rows fed to `rf generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    /// Rule rows, processed in file order
    pub rules: Vec<RuleInput>,
}

impl RuleSet {
    /// Load a rules file from YAML.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_yaml::from_str(&content).map_err(|e| CoreError::RulesParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(table: &str, field: &str, join: Option<&str>) -> RuleInput {
        RuleInput {
            table: table.to_string(),
            field: field.to_string(),
            rule: "must not be null".to_string(),
            join_condition: join.map(String::from),
            metadata: BTreeMap::new(),
        }
    }

    #[test]
    fn test_validate_ok() {
        assert!(rule("customers", "email", None).validate().is_ok());
    }

    #[test]
    fn test_validate_empty_table() {
        let err = rule("", "email", None).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidRuleInput { .. }));
    }

    #[test]
    fn test_validate_blank_field() {
        let err = rule("customers", "   ", None).validate().unwrap_err();
        assert!(matches!(err, CoreError::InvalidRuleInput { .. }));
    }

    #[test]
    fn test_sql_mode_simple_when_absent() {
        assert_eq!(rule("customers", "email", None).sql_mode(), SqlMode::Simple);
    }

    #[test]
    fn test_sql_mode_simple_when_blank() {
        assert_eq!(
            rule("customers", "email", Some("  ")).sql_mode(),
            SqlMode::Simple
        );
    }

    #[test]
    fn test_sql_mode_joined() {
        let mode = rule(
            "orders",
            "customer_id",
            Some("orders.customer_id = customers.customer_id"),
        )
        .sql_mode();
        assert_eq!(
            mode,
            SqlMode::Joined("orders.customer_id = customers.customer_id".to_string())
        );
    }

    #[test]
    fn test_ruleset_from_yaml() {
        let yaml = r#"
rules:
  - table: customers
    field: email
    rule: must not be null
  - table: orders
    field: customer_id
    rule: must match an existing customer
    join_condition: orders.customer_id = customers.customer_id
"#;
        let set: RuleSet = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(set.rules.len(), 2);
        assert_eq!(set.rules[0].sql_mode(), SqlMode::Simple);
        assert!(matches!(set.rules[1].sql_mode(), SqlMode::Joined(_)));
    }

    #[test]
    fn test_ruleset_rejects_unknown_fields() {
        let yaml = "rules: []\nextra: true\n";
        assert!(serde_yaml::from_str::<RuleSet>(yaml).is_err());
    }
}
