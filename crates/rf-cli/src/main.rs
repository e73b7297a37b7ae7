//! Ruleforge CLI - turns data-migration validation rules into test artifacts

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use cli::Cli;
use commands::{artifacts, generate, project};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        cli::Commands::Project(args) => project::execute(args, &cli.global).await,
        cli::Commands::Generate(args) => generate::execute(args, &cli.global).await,
        cli::Commands::Artifacts(args) => artifacts::execute(args, &cli.global).await,
    }
}
