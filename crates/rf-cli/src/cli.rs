//! CLI argument definitions using clap derive API

use clap::{Args, Parser, Subcommand, ValueEnum};

/// Ruleforge - generates migration test artifacts from declarative rules
#[derive(Parser, Debug)]
#[command(name = "rf")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Global arguments available to all commands
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true, default_value = "ruleforge.yml")]
    pub config: String,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage projects in the artifact store
    Project(ProjectArgs),

    /// Run a rules file through the generation pipeline
    Generate(GenerateArgs),

    /// List persisted artifacts for a project
    Artifacts(ArtifactsArgs),
}

/// Arguments for the project command
#[derive(Args, Debug)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub action: ProjectAction,
}

/// Project management actions
#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// Create a new project
    New {
        /// Project name
        name: String,

        /// Optional free-text description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all projects
    Ls {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        output: OutputFormat,
    },

    /// Delete a project and all its artifacts
    Rm {
        /// Project id to delete
        id: i64,
    },
}

/// Arguments for the generate command
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Project id to attach artifacts to
    #[arg(short, long)]
    pub project: i64,

    /// Path to the rules YAML file
    #[arg(short, long)]
    pub rules: String,
}

/// Arguments for the artifacts command
#[derive(Args, Debug)]
pub struct ArtifactsArgs {
    /// Project id to list artifacts for
    #[arg(short, long)]
    pub project: i64,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub output: OutputFormat,
}

/// Listing output formats
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text table
    Table,
    /// JSON output
    Json,
}
