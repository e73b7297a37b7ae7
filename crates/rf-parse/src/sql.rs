//! SQL output validation: raw backend text -> [`GeneratedSqlScript`].
//!
//! Structural checks only: the SQL is never executed or type-checked
//! against a live schema. JOIN and alias detection walk the parsed AST
//! rather than searching substrings, so identifiers like `joint_account`
//! never false-positive.

use crate::error::{ParseError, ParseResult};
use rf_core::artifact::{GeneratedSqlScript, SqlScriptKind};
use rf_core::rule::SqlMode;
use sqlparser::ast::{Query, SetExpr, Statement, TableFactor, TableWithJoins};
use sqlparser::dialect::GenericDialect;
use sqlparser::parser::Parser;

/// Validate raw backend output as a single violation-detection SELECT.
///
/// `mode` is the same tag the prompt composer branched on: simple mode
/// allows exactly one FROM relation and no JOIN (explicit or comma-implicit);
/// join mode requires an explicit JOIN and forbids table aliases (full
/// `table.column` notation only).
pub fn validate_sql(raw: &str, mode: &SqlMode) -> ParseResult<GeneratedSqlScript> {
    let cleaned = strip_markup(raw);
    if cleaned.is_empty() {
        return Err(ParseError::EmptyOutput);
    }

    let statements =
        Parser::parse_sql(&GenericDialect {}, &cleaned).map_err(|e| ParseError::SqlParseError {
            message: e.to_string(),
        })?;

    if statements.len() != 1 {
        return Err(ParseError::MultiStatement {
            count: statements.len(),
        });
    }

    let Statement::Query(query) = &statements[0] else {
        return Err(ParseError::MalformedOutput {
            reason: "expected a SELECT statement".to_string(),
        });
    };

    let mut shape = FromShape::default();
    collect_query(query, &mut shape);

    match mode {
        SqlMode::Simple => {
            if shape.join_count > 0 {
                return Err(ParseError::ForbiddenConstruct {
                    mode: "simple",
                    detail: "a JOIN".to_string(),
                });
            }
            // A comma-separated FROM list is an implicit cross join.
            if shape.relation_count > 1 {
                return Err(ParseError::ForbiddenConstruct {
                    mode: "simple",
                    detail: "more than one relation in FROM".to_string(),
                });
            }
        }
        SqlMode::Joined(_) => {
            if let Some(alias) = shape.aliases.first() {
                return Err(ParseError::ForbiddenConstruct {
                    mode: "join",
                    detail: format!("table alias '{alias}' instead of table.column notation"),
                });
            }
            if shape.join_count == 0 {
                return Err(ParseError::ForbiddenConstruct {
                    mode: "join",
                    detail: "no explicit JOIN".to_string(),
                });
            }
        }
    }

    Ok(GeneratedSqlScript {
        sql: cleaned,
        kind: match mode {
            SqlMode::Simple => SqlScriptKind::Simple,
            SqlMode::Joined(_) => SqlScriptKind::Join,
        },
    })
}

/// Strip markdown fencing, `<sql>` tags, lead-in labels, full-line comments,
/// and trailing terminators from backend output.
///
/// A semicolon followed by further SQL survives stripping and is caught as
/// `MultiStatement` by the parser.
fn strip_markup(raw: &str) -> String {
    let without_tags = raw.trim().replace("<sql>", "").replace("</sql>", "");

    let kept: Vec<&str> = without_tags
        .lines()
        .filter(|line| {
            let t = line.trim_start();
            !t.starts_with("```") && !t.starts_with("--") && !t.starts_with('#')
        })
        .collect();

    let mut text = kept.join("\n").trim().to_string();
    for label in ["SQL:", "sql:"] {
        if let Some(rest) = text.strip_prefix(label) {
            text = rest.trim_start().to_string();
        }
    }

    text.trim_end_matches(';').trim().to_string()
}

/// What the FROM tree contains: join count, how many relations appear in
/// FROM lists, and any table aliases found.
#[derive(Default)]
struct FromShape {
    join_count: usize,
    relation_count: usize,
    aliases: Vec<String>,
}

fn collect_query(query: &Query, shape: &mut FromShape) {
    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            collect_query(&cte.query, shape);
        }
    }
    collect_set_expr(query.body.as_ref(), shape);
}

fn collect_set_expr(expr: &SetExpr, shape: &mut FromShape) {
    match expr {
        SetExpr::Select(select) => {
            shape.relation_count += select.from.len();
            for table in &select.from {
                collect_table_with_joins(table, shape);
            }
        }
        SetExpr::Query(query) => collect_query(query, shape),
        SetExpr::SetOperation { left, right, .. } => {
            collect_set_expr(left, shape);
            collect_set_expr(right, shape);
        }
        _ => {}
    }
}

fn collect_table_with_joins(table: &TableWithJoins, shape: &mut FromShape) {
    shape.join_count += table.joins.len();
    collect_table_factor(&table.relation, shape);
    for join in &table.joins {
        collect_table_factor(&join.relation, shape);
    }
}

fn collect_table_factor(factor: &TableFactor, shape: &mut FromShape) {
    match factor {
        TableFactor::Table { alias, .. } => {
            if let Some(alias) = alias {
                shape.aliases.push(alias.name.value.clone());
            }
        }
        TableFactor::Derived {
            subquery, alias, ..
        } => {
            if let Some(alias) = alias {
                shape.aliases.push(alias.name.value.clone());
            }
            collect_query(subquery, shape);
        }
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => {
            // A nested join is itself a join construct.
            shape.join_count += 1;
            collect_table_with_joins(table_with_joins, shape);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn joined() -> SqlMode {
        SqlMode::Joined("orders.customer_id = customers.customer_id".to_string())
    }

    #[test]
    fn test_simple_null_check_accepted() {
        let script = validate_sql(
            "SELECT * FROM customers WHERE email IS NULL",
            &SqlMode::Simple,
        )
        .unwrap();
        assert_eq!(script.kind, SqlScriptKind::Simple);
        assert_eq!(script.sql, "SELECT * FROM customers WHERE email IS NULL");
    }

    #[test]
    fn test_fenced_output_stripped() {
        let raw = "```sql\nSELECT * FROM customers WHERE email IS NULL;\n```";
        let script = validate_sql(raw, &SqlMode::Simple).unwrap();
        assert_eq!(script.sql, "SELECT * FROM customers WHERE email IS NULL");
    }

    #[test]
    fn test_sql_tags_and_label_stripped() {
        let raw = "<sql>SQL: SELECT * FROM customers WHERE email IS NULL</sql>";
        let script = validate_sql(raw, &SqlMode::Simple).unwrap();
        assert_eq!(script.sql, "SELECT * FROM customers WHERE email IS NULL");
    }

    #[test]
    fn test_comment_lines_stripped() {
        let raw = "-- violating rows\nSELECT * FROM customers WHERE email IS NULL";
        let script = validate_sql(raw, &SqlMode::Simple).unwrap();
        assert!(!script.sql.contains("--"));
    }

    #[test]
    fn test_empty_output() {
        assert!(matches!(
            validate_sql("```sql\n```", &SqlMode::Simple),
            Err(ParseError::EmptyOutput)
        ));
    }

    #[test]
    fn test_multi_statement_rejected() {
        let err = validate_sql(
            "SELECT * FROM customers; SELECT * FROM orders",
            &SqlMode::Simple,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::MultiStatement { count: 2 }));
    }

    #[test]
    fn test_trailing_semicolon_is_not_multi_statement() {
        assert!(validate_sql("SELECT * FROM customers WHERE email IS NULL;", &SqlMode::Simple).is_ok());
    }

    #[test]
    fn test_non_select_rejected() {
        let err = validate_sql("DELETE FROM customers", &SqlMode::Simple).unwrap_err();
        assert!(matches!(err, ParseError::MalformedOutput { .. }));
    }

    #[test]
    fn test_unparseable_rejected() {
        let err = validate_sql("SELEC * FORM customers", &SqlMode::Simple).unwrap_err();
        assert!(matches!(err, ParseError::SqlParseError { .. }));
    }

    #[test]
    fn test_simple_mode_join_forbidden() {
        let err = validate_sql(
            "SELECT orders.id FROM orders JOIN customers ON orders.customer_id = customers.customer_id",
            &SqlMode::Simple,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::ForbiddenConstruct { mode: "simple", .. }
        ));
    }

    #[test]
    fn test_simple_mode_left_join_forbidden() {
        let err = validate_sql(
            "SELECT orders.id FROM orders LEFT JOIN customers ON orders.customer_id = customers.customer_id",
            &SqlMode::Simple,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::ForbiddenConstruct { .. }));
    }

    #[test]
    fn test_simple_mode_implicit_cross_join_forbidden() {
        let err = validate_sql(
            "SELECT * FROM orders, customers \
             WHERE orders.customer_id = customers.customer_id",
            &SqlMode::Simple,
        )
        .unwrap_err();
        assert!(matches!(
            err,
            ParseError::ForbiddenConstruct { mode: "simple", ref detail } if detail.contains("FROM")
        ));
    }

    #[test]
    fn test_simple_mode_join_in_derived_table_forbidden() {
        let err = validate_sql(
            "SELECT sub.id FROM (SELECT a.id FROM a JOIN b ON a.id = b.id) AS sub",
            &SqlMode::Simple,
        )
        .unwrap_err();
        assert!(matches!(err, ParseError::ForbiddenConstruct { .. }));
    }

    #[test]
    fn test_simple_mode_joinlike_identifier_passes() {
        // Strict AST detection: column names containing "join" are fine.
        assert!(validate_sql(
            "SELECT * FROM accounts WHERE joint_account IS NULL",
            &SqlMode::Simple,
        )
        .is_ok());
    }

    #[test]
    fn test_join_mode_accepted() {
        let sql = "SELECT orders.order_id FROM orders LEFT JOIN customers \
                   ON orders.customer_id = customers.customer_id \
                   WHERE customers.customer_id IS NULL";
        let script = validate_sql(sql, &joined()).unwrap();
        assert_eq!(script.kind, SqlScriptKind::Join);
    }

    #[test]
    fn test_join_mode_alias_forbidden() {
        let sql = "SELECT o.order_id FROM orders o JOIN customers c \
                   ON o.customer_id = c.customer_id";
        let err = validate_sql(sql, &joined()).unwrap_err();
        assert!(matches!(
            err,
            ParseError::ForbiddenConstruct { mode: "join", ref detail } if detail.contains("alias")
        ));
    }

    #[test]
    fn test_join_mode_without_join_forbidden() {
        let err = validate_sql("SELECT * FROM orders WHERE customer_id IS NULL", &joined())
            .unwrap_err();
        assert!(matches!(
            err,
            ParseError::ForbiddenConstruct { mode: "join", ref detail } if detail.contains("JOIN")
        ));
    }
}
