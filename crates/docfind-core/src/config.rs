//! Configuration management for docfind runs.
//!
//! Settings are stored in TOML and cover the remote endpoints, the shared
//! transport limits and the per-method deadline. Every field has a default, so
//! an empty file (or no file at all) yields a working configuration apart from
//! the search API key, which must come from the file, the environment or the
//! command line.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [search]
//! endpoint = "https://serpapi.com/search.json"
//! api_key = "..."
//! light_engine = "google_light"
//! ai_engine = "google_ai_mode"
//!
//! [collection]
//! endpoint = "https://www.postman.com/search"
//!
//! [transport]
//! max_concurrent = 20
//! request_timeout_secs = 10
//!
//! [pipeline]
//! method_timeout_secs = 120
//! ```
//!
//! ## Loading
//!
//! ```rust,no_run
//! use docfind_core::{Config, Result};
//! use std::path::Path;
//!
//! let config = Config::load_from(Path::new("docfind.toml"))?;
//! println!("Transport cap: {}", config.transport.max_concurrent);
//! # Ok::<(), docfind_core::Error>(())
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generic search API settings.
    pub search: SearchConfig,
    /// Collection search settings.
    pub collection: CollectionConfig,
    /// Shared HTTP transport settings.
    pub transport: TransportConfig,
    /// Per-method orchestration settings.
    pub pipeline: PipelineConfig,
}

/// Generic search API settings used by the web-search tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search endpoint accepting `api_key`, `engine` and `q` query parameters.
    pub endpoint: String,
    /// API key for the search endpoint.
    ///
    /// Usually supplied through `DOCFIND_SEARCH_API_KEY` rather than stored
    /// in the file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Engine identifier for the light engine.
    pub light_engine: String,
    /// Engine identifier for the AI engine.
    pub ai_engine: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://serpapi.com/search.json".to_string(),
            api_key: None,
            light_engine: "google_light".to_string(),
            ai_engine: "google_ai_mode".to_string(),
        }
    }
}

/// Collection search settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Public search page accepting `q`, `scope` and `type` query parameters.
    ///
    /// Collection links found in the page are resolved against this URL's
    /// origin.
    pub endpoint: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.postman.com/search".to_string(),
        }
    }
}

/// Shared HTTP transport settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Maximum number of requests in flight across the whole batch.
    pub max_concurrent: usize,
    /// Timeout applied to each individual request.
    pub request_timeout_secs: u64,
    /// User agent sent with every request.
    pub user_agent: String,
}

impl TransportConfig {
    /// Per-request timeout as a [`Duration`].
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            max_concurrent: 20,
            request_timeout_secs: 10,
            user_agent: concat!("docfind/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Per-method orchestration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Deadline for resolving all fields of a single method.
    ///
    /// Fields still unresolved when it expires are recorded as `"error"`.
    pub method_timeout_secs: u64,
}

impl PipelineConfig {
    /// Method deadline as a [`Duration`].
    #[must_use]
    pub const fn method_timeout(&self) -> Duration {
        Duration::from_secs(self.method_timeout_secs)
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            method_timeout_secs: 120,
        }
    }
}

impl Config {
    /// Load configuration from the platform config directory, or defaults when
    /// no file exists there.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path.
    ///
    /// Unlike [`Config::load`], a missing file is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read config {}: {e}", path.display()))
        })?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse config {}: {e}", path.display())))
    }

    /// Save the configuration as pretty TOML, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create config directory: {e}")))?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {e}")))?;

        fs::write(path, content).map_err(|e| Error::Config(format!("Failed to write config: {e}")))
    }

    /// Location of the default config file:
    /// - Linux: `~/.config/docfind/config.toml`
    /// - macOS: `~/Library/Application Support/dev.outfitter.docfind/config.toml`
    /// - Windows: `%APPDATA%\outfitter\docfind\config\config.toml`
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("dev", "outfitter", "docfind")
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }

    /// Check that the configuration can drive a run.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the search key is missing or blank, when
    /// a limit is zero, or when an endpoint is not an absolute URL.
    pub fn validate(&self) -> Result<()> {
        if self
            .search
            .api_key
            .as_deref()
            .is_none_or(|key| key.trim().is_empty())
        {
            return Err(Error::Config(
                "search API key is not set (use --api-key or DOCFIND_SEARCH_API_KEY)".into(),
            ));
        }
        if self.transport.max_concurrent == 0 {
            return Err(Error::Config("transport.max_concurrent must be at least 1".into()));
        }
        if self.transport.request_timeout_secs == 0 {
            return Err(Error::Config("transport.request_timeout_secs must be at least 1".into()));
        }
        if self.pipeline.method_timeout_secs == 0 {
            return Err(Error::Config("pipeline.method_timeout_secs must be at least 1".into()));
        }
        for (key, endpoint) in [
            ("search.endpoint", &self.search.endpoint),
            ("collection.endpoint", &self.collection.endpoint),
        ] {
            url::Url::parse(endpoint)
                .map_err(|e| Error::Config(format!("{key} is not a valid URL: {e}")))?;
        }
        Ok(())
    }
}
