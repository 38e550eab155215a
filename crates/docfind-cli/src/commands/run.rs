//! Run command implementation

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use colored::Colorize;
use docfind_core::{Config, HttpTransport, Pipeline, load_descriptors, save_results};
use tracing::info;

use crate::cli::RunArgs;
use crate::output::BatchProgress;

/// Legacy environment variable still accepted for the search API key.
const LEGACY_KEY_ENV: &str = "SERPAPI_KEY";

/// Discover documentation for every method in `args.input` and save results.
///
/// Configuration problems, an unusable input file and write failures abort
/// the run. Failures of individual methods only show up in the results.
pub async fn execute(args: RunArgs, config_path: Option<&Path>, quiet: bool) -> Result<()> {
    let config = resolve_config(&args, config_path)?;

    let transport =
        HttpTransport::new(&config.transport).context("Failed to initialize HTTP transport")?;

    let descriptors = load_descriptors(&args.input)
        .with_context(|| format!("Error loading input file {}", args.input.display()))?;
    if descriptors.is_empty() {
        bail!("No valid API methods found in {}", args.input.display());
    }
    if !quiet {
        println!(
            "Loaded {} API methods from {}",
            descriptors.len(),
            args.input.display()
        );
    }

    let progress = BatchProgress::new(descriptors.len(), quiet);
    let pipeline =
        Arc::new(Pipeline::new(Arc::new(transport), &config).with_progress(progress.callback()));

    let results = pipeline.run_batch(descriptors).await;
    progress.finish();

    let found = results.iter().filter(|r| r.has_link()).count();
    info!(found, total = results.len(), "batch finished");

    let (csv_path, json_path) = save_results(&results, &args.output)
        .with_context(|| format!("Error saving results to {}", args.output.display()))?;

    if !quiet {
        println!(
            "{} Results saved to {} and {}",
            "✓".green(),
            csv_path.display(),
            json_path.display()
        );
    }
    Ok(())
}

/// Load configuration and apply command-line overrides.
fn resolve_config(args: &RunArgs, config_path: Option<&Path>) -> Result<Config> {
    let mut config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    if let Some(key) = args
        .api_key
        .clone()
        .or_else(|| std::env::var(LEGACY_KEY_ENV).ok())
    {
        config.search.api_key = Some(key);
    }
    if let Some(concurrency) = args.concurrency {
        config.transport.max_concurrent = usize::from(concurrency);
    }
    if let Some(secs) = args.method_timeout {
        config.pipeline.method_timeout_secs = secs;
    }

    config.validate()?;
    Ok(config)
}
