//! Artifacts command implementation

use anyhow::{bail, Context, Result};
use rf_core::TestArtifact;

use crate::cli::{ArtifactsArgs, GlobalArgs, OutputFormat};
use crate::commands::common::{load_config, open_store};

/// Execute the artifacts command
pub async fn execute(args: &ArtifactsArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(&global.config)?;
    let db = open_store(&config)?;

    if !db.project_exists(args.project)? {
        bail!("Project {} not found", args.project);
    }

    let artifacts = db
        .fetch_artifacts(args.project)
        .context("Failed to fetch artifacts")?;

    match args.output {
        OutputFormat::Table => print_table(&artifacts),
        OutputFormat::Json => print_json(&artifacts)?,
    }

    Ok(())
}

fn print_table(artifacts: &[TestArtifact]) {
    if artifacts.is_empty() {
        println!("No artifacts found");
        return;
    }

    let field_width = artifacts
        .iter()
        .map(|a| a.data_field.len())
        .max()
        .unwrap_or(5)
        .max(5);
    let priority_width = artifacts
        .iter()
        .map(|a| a.priority.len())
        .max()
        .unwrap_or(8)
        .max(8);
    let status_width = artifacts
        .iter()
        .map(|a| a.status.len())
        .max()
        .unwrap_or(6)
        .max(6);

    println!(
        "{:<8}  {:<field_width$}  {:<priority_width$}  {:<status_width$}  {:<10}  {:<8}  SQL",
        "TEST", "FIELD", "PRIORITY", "STATUS", "EXECUTED", "REQ"
    );

    for artifact in artifacts {
        let executed = artifact
            .execution_date
            .map(|d| d.to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<8}  {:<field_width$}  {:<priority_width$}  {:<status_width$}  {:<10}  {:<8}  {}",
            artifact.test_case_id,
            artifact.data_field,
            artifact.priority,
            artifact.status,
            executed,
            artifact.requirement_id,
            truncate(&artifact.sql_script, 60),
        );
    }

    println!();
    println!("{} artifacts", artifacts.len());
}

fn print_json(artifacts: &[TestArtifact]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct ArtifactInfo<'a> {
        test_case_id: &'a str,
        data_field: &'a str,
        rule_description: &'a str,
        sql_script: &'a str,
        priority: &'a str,
        status: &'a str,
        execution_date: Option<String>,
        requirement_id: &'a str,
    }

    let rows: Vec<ArtifactInfo<'_>> = artifacts
        .iter()
        .map(|a| ArtifactInfo {
            test_case_id: &a.test_case_id,
            data_field: &a.data_field,
            rule_description: &a.rule_description,
            sql_script: &a.sql_script,
            priority: &a.priority,
            status: &a.status,
            execution_date: a.execution_date.map(|d| d.to_string()),
            requirement_id: &a.requirement_id,
        })
        .collect();

    let json = serde_json::to_string_pretty(&rows).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}

/// Single-line preview of a SQL script, bounded to `max` characters.
fn truncate(sql: &str, max: usize) -> String {
    let flat = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.chars().count() <= max {
        flat
    } else {
        let cut: String = flat.chars().take(max).collect();
        format!("{}...", cut.trim_end())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_sql_untouched() {
        assert_eq!(truncate("SELECT 1", 60), "SELECT 1");
    }

    #[test]
    fn test_truncate_flattens_whitespace() {
        assert_eq!(
            truncate("SELECT *\n  FROM customers", 60),
            "SELECT * FROM customers"
        );
    }

    #[test]
    fn test_truncate_bounds_length() {
        let long = "SELECT a, b, c, d, e, f FROM a_rather_long_table_name WHERE x IS NULL";
        let out = truncate(long, 20);
        assert!(out.len() <= 24);
        assert!(out.ends_with("..."));
    }
}
