//! # docfind-core
//!
//! Core functionality for docfind - tiered discovery of API documentation links.
//!
//! Given a list of API methods (service name, method name, example endpoint
//! URL), docfind finds where each method is documented. Discovery is tiered by
//! cost so that the expensive search API is only queried when the cheap
//! lookups come up empty.
//!
//! ## Architecture
//!
//! - **Transport**: one shared HTTP client with a global, fair concurrency cap
//! - **Discovery**: manifest probing, collection search, web search with
//!   relevance filtering and specificity scoring
//! - **Pipeline**: per-method orchestration with a method deadline, and batch
//!   execution with results kept in input order
//! - **Persistence**: descriptor loading (CSV/JSON), result files (CSV/JSON),
//!   tracker conversion
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::path::Path;
//! use std::sync::Arc;
//! use docfind_core::{Config, HttpTransport, Pipeline, load_descriptors, save_results};
//!
//! # async fn example() -> docfind_core::Result<()> {
//! let config = Config::load()?;
//! config.validate()?;
//!
//! let transport = Arc::new(HttpTransport::new(&config.transport)?);
//! let pipeline = Arc::new(Pipeline::new(transport, &config));
//!
//! let descriptors = load_descriptors(Path::new("methods.csv"))?;
//! let results = pipeline.run_batch(descriptors).await;
//! save_results(&results, Path::new("results"))?;
//! # Ok(())
//! # }
//! ```

/// Configuration loading and validation
pub mod config;
/// Tiered discovery: manifest probing, collection search, web search
pub mod discovery;
/// Error types and result aliases
pub mod error;
/// Descriptor loading from CSV and JSON
pub mod input;
/// Result persistence
pub mod output;
/// Per-method orchestration and batch execution
pub mod pipeline;
/// Conversion of results into tracker entries
pub mod tracker;
/// HTTP transport with a global concurrency cap
pub mod transport;
/// Core data types
pub mod types;

pub use config::{CollectionConfig, Config, PipelineConfig, SearchConfig, TransportConfig};
pub use error::{Error, Result};
pub use input::load_descriptors;
pub use output::{ResultRecord, load_records, save_results};
pub use pipeline::{Pipeline, ProgressCallback};
pub use tracker::{DocType, TrackerEntry, convert_results};
pub use transport::{Fetched, HttpTransport, ProbeStatus, Transport};
pub use types::*;
