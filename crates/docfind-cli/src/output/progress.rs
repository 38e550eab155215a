//! Progress display for batch runs

use std::sync::Arc;

use colored::Colorize;
use docfind_core::{ProcessingResult, ProgressCallback};
use indicatif::{ProgressBar, ProgressStyle};
use is_terminal::IsTerminal;

/// Progress bar plus one status line per finished method.
///
/// The bar is drawn on stderr and only when it is a terminal; status lines go
/// to stdout unless `quiet` is set.
#[derive(Clone)]
pub struct BatchProgress {
    bar: ProgressBar,
    quiet: bool,
}

impl BatchProgress {
    /// Create the display for `total` methods.
    pub fn new(total: usize, quiet: bool) -> Self {
        let bar = if quiet || !std::io::stderr().is_terminal() {
            ProgressBar::hidden()
        } else {
            create_bar(total as u64)
        };
        Self { bar, quiet }
    }

    /// Callback that advances the bar and prints a status line.
    pub fn callback(&self) -> ProgressCallback {
        let progress = self.clone();
        Arc::new(move |result: &ProcessingResult| progress.record(result))
    }

    fn record(&self, result: &ProcessingResult) {
        if !self.quiet {
            let line = status_line(result);
            self.bar.suspend(|| println!("{line}"));
        }
        self.bar.inc(1);
    }

    /// Remove the bar once the batch is done.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

fn create_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-"),
    );
    pb.set_message("Processing API methods");
    pb
}

/// `✓ found for {name} {method}` or `✗ error for {name} {method}: ...`.
pub fn status_line(result: &ProcessingResult) -> String {
    let descriptor = result.descriptor();
    if result.has_link() {
        format!(
            "{} found for {} {}",
            "✓".green(),
            descriptor.name,
            descriptor.method
        )
    } else {
        format!(
            "{} error for {} {}: No documentation found",
            "✗".red(),
            descriptor.name,
            descriptor.method
        )
    }
}
