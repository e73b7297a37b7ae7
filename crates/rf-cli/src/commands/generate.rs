//! Generate command implementation

use anyhow::{bail, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use rf_core::metadata::MetadataProvider;
use rf_core::rule::{RuleInput, RuleSet, SqlMode};
use rf_llm::OllamaBackend;
use rf_pipeline::{Pipeline, PipelineOptions, RunOutcome};
use rf_store::ArtifactDb;
use std::collections::BTreeSet;
use std::path::Path;

use crate::cli::{GenerateArgs, GlobalArgs};
use crate::commands::common::{load_config, open_store};

/// Execute the generate command
pub async fn execute(args: &GenerateArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(&global.config)?;
    let db = open_store(&config)?;

    if !db.project_exists(args.project)? {
        bail!("Project {} not found (create it with 'rf project new')", args.project);
    }

    let rules_path = Path::new(&args.rules);
    let ruleset = RuleSet::load(rules_path)
        .with_context(|| format!("Failed to load rules from {}", args.rules))?;
    if ruleset.rules.is_empty() {
        println!("No rules in {}", args.rules);
        return Ok(());
    }

    let rules = enrich_with_metadata(ruleset.rules, &db);

    let backend =
        OllamaBackend::new(&config.backend).context("Failed to build generation backend")?;
    let pipeline = Pipeline::new(&backend, &db, PipelineOptions::from(&config.generation));

    println!(
        "Generating {} artifacts for project {} via {} ({})",
        rules.len(),
        args.project,
        config.backend.url,
        config.backend.model
    );

    let progress = if global.verbose {
        None
    } else {
        let pb = ProgressBar::new(rules.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        Some(pb)
    };

    // Walks the rules here instead of through Pipeline::run_all so the
    // progress bar and verbose per-rule lines can interleave with each run.
    // Failure isolation and sequence numbering are identical.
    let mut outcomes = Vec::with_capacity(rules.len());
    for (index, rule) in rules.iter().enumerate() {
        if let Some(pb) = &progress {
            pb.set_message(format!("{}.{}", rule.table, rule.field));
        }

        let outcome = match pipeline.run(args.project, rule, index + 1).await {
            Ok(persisted) => {
                if global.verbose {
                    println!(
                        "  {} {}.{} [{}] {}",
                        persisted.artifact.test_case_id,
                        rule.table,
                        rule.field,
                        persisted.test_case.category,
                        persisted.test_case.title
                    );
                }
                RunOutcome::Persisted(Box::new(persisted))
            }
            Err(error) => RunOutcome::Failed { index, error },
        };
        outcomes.push(outcome);

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    report(&outcomes, &rules)
}

/// Print the per-rule summary and fail the command if any rule aborted.
fn report(outcomes: &[RunOutcome], rules: &[RuleInput]) -> Result<()> {
    let mut persisted = 0usize;
    let mut failed = 0usize;

    for outcome in outcomes {
        match outcome {
            RunOutcome::Persisted(_) => persisted += 1,
            RunOutcome::Failed { index, error } => {
                failed += 1;
                let rule = &rules[*index];
                eprintln!(
                    "  rule {} ({}.{}) failed at '{}': {}",
                    index + 1,
                    rule.table,
                    rule.field,
                    error.stage(),
                    error
                );
            }
        }
    }

    println!();
    println!("{} artifacts persisted, {} failed", persisted, failed);

    if failed > 0 {
        bail!("{} of {} rules failed", failed, outcomes.len());
    }
    Ok(())
}

/// Fill in missing table metadata from the store's catalog.
///
/// Rules that already carry metadata are left alone; for the rest, every
/// referenced table is looked up and empty results are simply omitted.
fn enrich_with_metadata(rules: Vec<RuleInput>, provider: &ArtifactDb) -> Vec<RuleInput> {
    rules
        .into_iter()
        .map(|mut rule| {
            if rule.metadata.is_empty() {
                for table in referenced_tables(&rule) {
                    let columns = provider.table_metadata(&table);
                    if !columns.is_empty() {
                        rule.metadata.insert(table, columns);
                    }
                }
            }
            rule
        })
        .collect()
}

/// Tables a rule touches: the target table plus any table qualified with
/// `table.column` notation in the join condition.
fn referenced_tables(rule: &RuleInput) -> BTreeSet<String> {
    let mut tables = BTreeSet::new();
    tables.insert(rule.table.clone());

    if let SqlMode::Joined(condition) = rule.sql_mode() {
        for token in condition.split(|c: char| !c.is_alphanumeric() && c != '_' && c != '.') {
            if let Some((table, column)) = token.split_once('.') {
                if !table.is_empty() && !column.is_empty() {
                    tables.insert(table.to_string());
                }
            }
        }
    }

    tables
}
