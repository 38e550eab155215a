//! Relevance filtering and specificity scoring for search candidates.
//!
//! Search engines return plenty of links that rank well but have nothing to do
//! with the service being documented: forum threads, tutorials for other
//! products, aggregator pages. Selection therefore happens in two stages:
//!
//! 1. **Relevance gate** ([`ServiceProfile::is_relevant`]): a candidate must
//!    be tied to the service by its host or by its title/snippet. Candidates
//!    that fail are discarded and never scored.
//! 2. **Specificity score** ([`ServiceProfile::score`]): survivors are ranked
//!    by how specific the URL looks (matching host, fragment, method words,
//!    path depth) and the highest score wins. Ties keep input order.
//!
//! Everything here is synchronous and pure: the same candidate list and
//! descriptor always produce the same selection.

use url::Url;

use super::host::{DOCS_PREFIXES, GENERIC_PREFIXES, host_of, strip_prefixes};
use crate::types::{MethodDescriptor, SearchCandidate};

/// Raw candidates considered per query.
pub const MAX_CANDIDATES: usize = 10;

/// Relevant candidates scored per query.
pub const MAX_SCORED: usize = 5;

/// Paths that point at a documentation landing page rather than a method.
const GENERIC_PATHS: &[&str] = &["/docs", "/documentation", "/api", "/reference"];

/// URL fragments that suggest a method- or endpoint-level page.
const ENDPOINT_KEYWORDS: &[&str] = &[
    "method",
    "endpoint",
    "operation",
    "post/",
    "get/",
    "put/",
    "delete/",
];

/// Words shorter than this (in characters) are too generic to match on.
const MIN_TOKEN_CHARS: usize = 4;

/// Pre-computed matching data for one descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceProfile {
    name: String,
    name_tokens: Vec<String>,
    method_words: Vec<String>,
    origin_host: String,
}

impl ServiceProfile {
    /// Build the profile for `descriptor`.
    #[must_use]
    pub fn new(descriptor: &MethodDescriptor) -> Self {
        let name = descriptor.name.trim().to_lowercase();
        let name_tokens = significant_words(&name);
        let method_words = significant_words(&descriptor.method.to_lowercase());
        let origin_host = host_of(&descriptor.example_url)
            .map(|host| strip_prefixes(&host, GENERIC_PREFIXES))
            .unwrap_or_default();

        Self {
            name,
            name_tokens,
            method_words,
            origin_host,
        }
    }

    /// Relevance gate. Checks short-circuit on the first match:
    ///
    /// 1. the candidate host (without `api.`/`www.`) contains the service host;
    /// 2. a name token appears in the candidate host (without doc prefixes);
    /// 3. the full name appears in title + snippet;
    /// 4. a name token appears in title + snippet.
    ///
    /// Doc-site hosts (`docs.`, `developers.`, `github.com`, ...) get no
    /// special treatment: they pass only through a mention, which rules 3 and
    /// 4 already accept.
    #[must_use]
    pub fn is_relevant(&self, candidate: &SearchCandidate) -> bool {
        let host = host_of(&candidate.url).unwrap_or_default();
        let bare_host = strip_prefixes(&host, DOCS_PREFIXES);

        if self.same_service_host(&host) {
            return true;
        }
        if self.token_in(&bare_host) {
            return true;
        }

        let text = format!("{} {}", candidate.title, candidate.snippet).to_lowercase();
        (!self.name.is_empty() && text.contains(&self.name)) || self.token_in(&text)
    }

    /// Specificity score of `url` for this service. Higher is more specific.
    #[must_use]
    pub fn score(&self, url: &str) -> i32 {
        let url_lower = url.to_lowercase();
        let parsed = Url::parse(url).ok();
        let host = parsed
            .as_ref()
            .and_then(Url::host_str)
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let bare_host = strip_prefixes(&host, DOCS_PREFIXES);
        let path = parsed.as_ref().map_or("", Url::path);

        let mut score = 0;

        if self.same_service_host(&host) {
            score += 100;
        }

        score += 80 * count_in(&self.name_tokens, &bare_host);

        if url.contains('#') {
            score += 50;
        }

        score += 20 * count_in(&self.method_words, &url_lower);

        let segments = path.split('/').filter(|s| !s.is_empty()).count();
        if segments >= 3 {
            score += 30;
        } else if segments >= 2 {
            score += 15;
        }

        if GENERIC_PATHS.contains(&path) {
            score -= 20;
        }

        if ENDPOINT_KEYWORDS.iter().any(|kw| url_lower.contains(kw)) {
            score += 25;
        }

        score
    }

    /// Pick the best candidate: gate the first [`MAX_CANDIDATES`], score the
    /// first [`MAX_SCORED`] survivors, keep the earliest of the highest.
    #[must_use]
    pub fn select_best<'a>(&self, candidates: &'a [SearchCandidate]) -> Option<&'a SearchCandidate> {
        let mut scored: Vec<(i32, &SearchCandidate)> = candidates
            .iter()
            .take(MAX_CANDIDATES)
            .filter(|c| !c.url.is_empty() && self.is_relevant(c))
            .take(MAX_SCORED)
            .map(|c| (self.score(&c.url), c))
            .collect();

        // stable: equal scores keep input order
        scored.sort_by(|a, b| b.0.cmp(&a.0));
        scored.first().map(|(_, candidate)| *candidate)
    }

    fn same_service_host(&self, host: &str) -> bool {
        !self.origin_host.is_empty() && strip_prefixes(host, GENERIC_PREFIXES).contains(&self.origin_host)
    }

    fn token_in(&self, haystack: &str) -> bool {
        self.name_tokens.iter().any(|token| haystack.contains(token.as_str()))
    }
}

fn significant_words(text: &str) -> Vec<String> {
    text.split_whitespace()
        .filter(|word| word.chars().count() >= MIN_TOKEN_CHARS)
        .map(str::to_string)
        .collect()
}

fn count_in(words: &[String], haystack: &str) -> i32 {
    let hits = words.iter().filter(|w| haystack.contains(w.as_str())).count();
    i32::try_from(hits).unwrap_or(i32::MAX)
}
