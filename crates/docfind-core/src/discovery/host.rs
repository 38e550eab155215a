//! Host and origin helpers shared by the discovery tiers.
//!
//! All host comparisons in the crate go through [`strip_prefixes`] so the
//! collection search, the relevance filter and the scorer agree on what
//! "the same service" means.

use url::Url;

/// Prefixes removed from a host before comparing it with another host.
pub const GENERIC_PREFIXES: &[&str] = &["api.", "www."];

/// Prefixes removed before looking for service-name tokens in a host.
pub const DOCS_PREFIXES: &[&str] = &["api.", "www.", "docs.", "developers.", "dev."];

/// Lower-case `host` and remove each prefix in `prefixes`, in order.
///
/// Each prefix is considered once; `api.www.example.com` loses both
/// prefixes, `www.api.example.com` keeps `api.`.
///
/// ```rust
/// use docfind_core::discovery::host::{strip_prefixes, DOCS_PREFIXES, GENERIC_PREFIXES};
///
/// assert_eq!(strip_prefixes("API.Zoom.us", GENERIC_PREFIXES), "zoom.us");
/// assert_eq!(strip_prefixes("developers.hubspot.com", DOCS_PREFIXES), "hubspot.com");
/// ```
#[must_use]
pub fn strip_prefixes(host: &str, prefixes: &[&str]) -> String {
    let mut host = host.trim().to_ascii_lowercase();
    for prefix in prefixes {
        if let Some(rest) = host.strip_prefix(prefix) {
            host = rest.to_string();
        }
    }
    host
}

/// Lower-cased host of `url`, or `None` when it has none.
#[must_use]
pub fn host_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed.host_str().map(str::to_ascii_lowercase)
}

/// `scheme://host[:port]` of an http(s) URL.
///
/// Default ports are omitted; explicit non-default ports are kept.
#[must_use]
pub fn origin_of(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    if !matches!(parsed.scheme(), "http" | "https") || parsed.host_str().is_none() {
        return None;
    }
    Some(parsed.origin().ascii_serialization())
}
