//! Core data types shared by the discovery tiers and the persistence layer.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::{Error, Result};

/// Literal written into a result field when a discovery attempt failed.
pub const ERROR_SENTINEL: &str = "error";

/// An API method whose documentation should be located.
///
/// Loaded from the `name`, `method` and `method_link` columns of an input
/// file. All three fields are trimmed and non-empty once loading succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodDescriptor {
    /// Service name, e.g. `Zoom`.
    pub name: String,
    /// Human-readable method name, e.g. `Create meeting`.
    pub method: String,
    /// Example endpoint URL for the method.
    #[serde(rename = "method_link")]
    pub example_url: String,
}

impl MethodDescriptor {
    /// Create a descriptor from its three parts.
    pub fn new(
        name: impl Into<String>,
        method: impl Into<String>,
        example_url: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            method: method.into(),
            example_url: example_url.into(),
        }
    }

    /// Check that the descriptor can be processed.
    ///
    /// All fields must be non-blank and the example URL must be an absolute
    /// `http`/`https` URL with a host.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("name", &self.name),
            ("method", &self.method),
            ("method_link", &self.example_url),
        ] {
            if value.trim().is_empty() {
                return Err(Error::InvalidInput(format!("descriptor field '{field}' is empty")));
            }
        }

        let parsed = Url::parse(&self.example_url)
            .map_err(|e| Error::InvalidUrl(format!("{}: {e}", self.example_url)))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
            return Err(Error::InvalidUrl(format!(
                "{} is not an absolute http(s) URL",
                self.example_url
            )));
        }
        Ok(())
    }
}

/// One candidate link returned by a search engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchCandidate {
    /// Target URL.
    pub url: String,
    /// Result title.
    pub title: String,
    /// Result snippet; empty when the engine omits it.
    pub snippet: String,
}

impl SearchCandidate {
    /// Create a candidate.
    pub fn new(url: impl Into<String>, title: impl Into<String>, snippet: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            snippet: snippet.into(),
        }
    }
}

/// Result of a single discovery attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
    /// The attempt completed and produced a link.
    Found(String),
    /// The attempt completed without a qualifying link.
    NotFound,
    /// The attempt could not complete (timeout, transport or parse fault).
    Failed,
}

impl TierOutcome {
    /// Returns the link when one was found.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Found(url) => Some(url),
            Self::NotFound | Self::Failed => None,
        }
    }

    /// Returns true for [`TierOutcome::Found`].
    #[must_use]
    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Final state of one discovery field in a [`ProcessingResult`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldOutcome {
    /// The tier was skipped because a cheaper tier succeeded.
    #[default]
    NotAttempted,
    /// The tier ran and found nothing.
    NotFound,
    /// The tier ran and produced a link.
    Found(String),
    /// The tier ran and failed.
    Failed,
}

impl FieldOutcome {
    /// Encode the outcome as the persisted string form: a URL, `""` or `"error"`.
    #[must_use]
    pub fn sentinel(&self) -> &str {
        match self {
            Self::NotAttempted | Self::NotFound => "",
            Self::Found(url) => url,
            Self::Failed => ERROR_SENTINEL,
        }
    }

    /// Returns the link when one was found.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Found(url) => Some(url),
            _ => None,
        }
    }
}

impl From<TierOutcome> for FieldOutcome {
    fn from(outcome: TierOutcome) -> Self {
        match outcome {
            TierOutcome::Found(url) => Self::Found(url),
            TierOutcome::NotFound => Self::NotFound,
            TierOutcome::Failed => Self::Failed,
        }
    }
}

/// The six discovery fields of a result, in persisted column order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DiscoveryFields {
    /// Manifest found by direct path probing.
    pub openapi_link: FieldOutcome,
    /// Collection found by collection search.
    pub postman_link: FieldOutcome,
    /// Light engine, name query.
    pub search_by_name: FieldOutcome,
    /// Light engine, URL query.
    pub search_by_url: FieldOutcome,
    /// AI engine, name query.
    pub ai_search_by_name: FieldOutcome,
    /// AI engine, URL query.
    pub ai_search_by_url: FieldOutcome,
}

impl DiscoveryFields {
    /// Every field marked as failed.
    #[must_use]
    pub const fn all_failed() -> Self {
        Self {
            openapi_link: FieldOutcome::Failed,
            postman_link: FieldOutcome::Failed,
            search_by_name: FieldOutcome::Failed,
            search_by_url: FieldOutcome::Failed,
            ai_search_by_name: FieldOutcome::Failed,
            ai_search_by_url: FieldOutcome::Failed,
        }
    }

    /// Fields paired with their persisted column names.
    #[must_use]
    pub const fn columns(&self) -> [(&'static str, &FieldOutcome); 6] {
        [
            ("openapi_link", &self.openapi_link),
            ("postman_link", &self.postman_link),
            ("search_method_name", &self.search_by_name),
            ("search_method_link", &self.search_by_url),
            ("ai_method_name", &self.ai_search_by_name),
            ("ai_method_link", &self.ai_search_by_url),
        ]
    }
}

/// Outcome of running the pipeline for one descriptor.
///
/// Constructed once by the pipeline and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessingResult {
    descriptor: MethodDescriptor,
    fields: DiscoveryFields,
}

impl ProcessingResult {
    /// Assemble a result from its descriptor and discovery fields.
    #[must_use]
    pub const fn new(descriptor: MethodDescriptor, fields: DiscoveryFields) -> Self {
        Self { descriptor, fields }
    }

    /// A result whose six discovery fields are all `"error"`.
    #[must_use]
    pub const fn failed(descriptor: MethodDescriptor) -> Self {
        Self::new(descriptor, DiscoveryFields::all_failed())
    }

    /// The descriptor this result belongs to.
    #[must_use]
    pub const fn descriptor(&self) -> &MethodDescriptor {
        &self.descriptor
    }

    /// The discovery fields.
    #[must_use]
    pub const fn fields(&self) -> &DiscoveryFields {
        &self.fields
    }

    /// True when at least one field holds a link.
    #[must_use]
    pub fn has_link(&self) -> bool {
        self.fields
            .columns()
            .iter()
            .any(|(_, outcome)| outcome.url().is_some())
    }
}
