//! Error types and handling for docfind-core operations.
//!
//! Errors in this module describe failures at the *edges* of the system:
//! loading configuration, reading descriptor files, writing result files and
//! constructing the HTTP transport. The discovery tiers themselves never return
//! an [`Error`]; they report tagged outcomes (see [`crate::TierOutcome`]) so a
//! single failing probe cannot abort a batch.
//!
//! ## Error Categories
//!
//! - **I/O Errors**: reading input files, writing result files
//! - **Network Errors**: building the HTTP client
//! - **Parse Errors**: malformed input records
//! - **Configuration Errors**: invalid settings or config files
//! - **Input Errors**: unsupported file formats, empty batches
//!
//! ## Recovery Hints
//!
//! ```rust
//! use docfind_core::{Error, Result};
//!
//! fn handle(result: Result<()>) {
//!     match result {
//!         Err(e) if e.is_recoverable() => println!("Temporary failure, retrying..."),
//!         Err(e) => println!("Permanent failure ({}): {}", e.category(), e),
//!         Ok(()) => println!("Success"),
//!     }
//! }
//! # handle(Ok(()));
//! ```

use thiserror::Error;

/// The main error type for docfind-core operations.
///
/// `Display` provides user-facing messages; the source chain is preserved for
/// wrapped errors (`Io`, `Network`).
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation failed.
    ///
    /// Covers reading descriptor files and writing result files. The underlying
    /// `std::io::Error` is preserved.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Network layer could not be initialized.
    ///
    /// Individual request failures never surface as this variant; they are
    /// folded into transport outcomes instead.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Input content could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration is invalid or inaccessible.
    ///
    /// ## Common Causes
    ///
    /// - Invalid TOML syntax in the config file
    /// - Missing search API key
    /// - Zero concurrency or timeout values
    #[error("Configuration error: {0}")]
    Config(String),

    /// URL is malformed or cannot be reduced to an origin.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Input file or records are unusable.
    ///
    /// Used for unsupported file extensions, missing required columns and
    /// batches without a single valid descriptor.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Serialization or deserialization failed.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Tabular encoding failed.
    #[error("CSV error: {0}")]
    Csv(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

impl Error {
    /// Check if the error might be recoverable through retry.
    ///
    /// Timeouts, connection failures and interrupted I/O are recoverable;
    /// configuration and input errors are not.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(e) => e.is_timeout() || e.is_connect(),
            Self::Io(e) => matches!(
                e.kind(),
                std::io::ErrorKind::TimedOut | std::io::ErrorKind::Interrupted
            ),
            _ => false,
        }
    }

    /// Get the error category as a string for logging.
    #[must_use]
    pub const fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::Network(_) => "network",
            Self::Parse(_) => "parse",
            Self::Config(_) => "config",
            Self::InvalidUrl(_) => "invalid_url",
            Self::InvalidInput(_) => "invalid_input",
            Self::Serialization(_) => "serialization",
            Self::Csv(_) => "csv",
        }
    }
}

/// Convenience type alias for Results with our Error type.
pub type Result<T> = std::result::Result<T, Error>;
