//! docfind CLI - tiered discovery of API documentation links
//!
//! This is the main entry point for the docfind command-line interface.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod output;
mod utils;

use cli::{Cli, Commands};

/// Exit code for a run interrupted with Ctrl-C.
const INTERRUPTED_EXIT_CODE: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    utils::initialize_logging(&cli)?;

    tokio::select! {
        result = execute_command(cli) => result,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nProcess interrupted by user");
            std::process::exit(INTERRUPTED_EXIT_CODE);
        }
    }
}

async fn execute_command(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Run(args) => {
            commands::run_batch(args, cli.config.as_deref(), cli.quiet).await?;
        },
        Commands::Convert(args) => {
            commands::convert_results(&args, cli.quiet)?;
        },
    }
    Ok(())
}
