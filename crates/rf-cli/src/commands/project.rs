//! Project command implementation

use anyhow::{Context, Result};

use crate::cli::{GlobalArgs, OutputFormat, ProjectAction, ProjectArgs};
use crate::commands::common::{load_config, open_store};

/// Execute the project command
pub async fn execute(args: &ProjectArgs, global: &GlobalArgs) -> Result<()> {
    let config = load_config(&global.config)?;
    let db = open_store(&config)?;

    match &args.action {
        ProjectAction::New { name, description } => {
            let id = db
                .insert_project(name, description.as_deref())
                .context("Failed to create project")?;
            println!("Created project {} (id {})", name, id);
        }
        ProjectAction::Ls { output } => {
            let projects = db.fetch_projects().context("Failed to list projects")?;
            match output {
                OutputFormat::Table => print_table(&projects),
                OutputFormat::Json => print_json(&projects)?,
            }
        }
        ProjectAction::Rm { id } => {
            let removed = db.count_artifacts(*id).unwrap_or(0);
            db.delete_project(*id)
                .with_context(|| format!("Failed to delete project {}", id))?;
            println!("Deleted project {} ({} artifacts removed)", id, removed);
        }
    }

    Ok(())
}

fn print_table(projects: &[rf_store::ProjectRow]) {
    if projects.is_empty() {
        println!("No projects found");
        return;
    }

    let name_width = projects
        .iter()
        .map(|p| p.name.len())
        .max()
        .unwrap_or(4)
        .max(4);

    println!(
        "{:>4}  {:<name_width$}  {:<19}  DESCRIPTION",
        "ID", "NAME", "CREATED"
    );
    for project in projects {
        println!(
            "{:>4}  {:<name_width$}  {:<19}  {}",
            project.project_id,
            project.name,
            project.created_at,
            project.description.as_deref().unwrap_or("-"),
        );
    }
    println!();
    println!("{} projects", projects.len());
}

fn print_json(projects: &[rf_store::ProjectRow]) -> Result<()> {
    #[derive(serde::Serialize)]
    struct ProjectInfo<'a> {
        project_id: i64,
        name: &'a str,
        description: Option<&'a str>,
        created_at: &'a str,
    }

    let rows: Vec<ProjectInfo<'_>> = projects
        .iter()
        .map(|p| ProjectInfo {
            project_id: p.project_id,
            name: &p.name,
            description: p.description.as_deref(),
            created_at: &p.created_at,
        })
        .collect();

    let json = serde_json::to_string_pretty(&rows).context("Failed to serialize to JSON")?;
    println!("{}", json);
    Ok(())
}
