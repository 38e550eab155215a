//! Convert command implementation

use anyhow::{Context, Result};
use colored::Colorize;
use docfind_core::{convert_results, load_records, tracker};

use crate::cli::ConvertArgs;

/// Convert a results file into tracker entries.
pub fn execute(args: &ConvertArgs, quiet: bool) -> Result<()> {
    let records = load_records(&args.input)
        .with_context(|| format!("Failed to read results from {}", args.input.display()))?;

    let entries = convert_results(&records);

    tracker::save_entries(&entries, &args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if !quiet {
        println!(
            "{} Converted {} entries from {} results",
            "✓".green(),
            entries.len(),
            records.len()
        );
        println!("Saved to {}", args.output.display());
    }
    Ok(())
}
