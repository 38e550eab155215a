//! # CLI Structure and Argument Parsing
//!
//! `docfind` has two commands:
//!
//! - **run**: load API methods from a CSV/JSON file, discover documentation
//!   links for each and write `{output}.csv` and `{output}.json`
//! - **convert**: turn a saved results file into documentation-tracker entries
//!
//! ## Usage Patterns
//!
//! ```bash
//! docfind run --input methods.csv
//! docfind run --input methods.json --output data/results --concurrency 5
//! docfind convert results.json --output urls.json
//! ```
//!
//! ## Global Options
//!
//! - `--verbose`: debug logging on stderr
//! - `--quiet`: errors only, no progress bar
//! - `--no-color`: plain output (also honoured through `NO_COLOR`)
//! - `--config`: explicit configuration file instead of the platform default

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure for the `docfind` command
#[derive(Parser, Clone, Debug)]
#[command(name = "docfind")]
#[command(version)]
#[command(about = "docfind - find API documentation for a list of methods", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "PATH", env = "DOCFIND_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Discover documentation links for every method in an input file
    Run(RunArgs),

    /// Convert a results file into documentation-tracker entries
    Convert(ConvertArgs),
}

/// Arguments for `docfind run`
#[derive(Args, Clone, Debug)]
pub struct RunArgs {
    /// Input CSV or JSON file with `name`, `method` and `method_link` fields
    #[arg(short, long, value_name = "PATH")]
    pub input: PathBuf,

    /// Base path for the output files, without extension
    #[arg(short, long, value_name = "BASE", default_value = "results")]
    pub output: PathBuf,

    /// Search API key
    #[arg(long, env = "DOCFIND_SEARCH_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Maximum number of HTTP requests in flight
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: Option<u16>,

    /// Seconds allowed to resolve all fields of one method
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    pub method_timeout: Option<u64>,
}

/// Arguments for `docfind convert`
#[derive(Args, Clone, Debug)]
pub struct ConvertArgs {
    /// Results JSON written by `docfind run`
    #[arg(value_name = "RESULTS_JSON")]
    pub input: PathBuf,

    /// Tracker entries output file
    #[arg(short, long, value_name = "PATH", default_value = "urls.json")]
    pub output: PathBuf,
}
