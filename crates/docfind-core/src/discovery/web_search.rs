//! Generic web search, the last and most expensive discovery tier.
//!
//! Four queries go to the search API at once: two phrasings of the method,
//! each sent to a lightweight engine and to an AI engine. Every slot is
//! resolved on its own, so a rate-limited AI engine does not cost the light
//! engine its answers.
//!
//! | slot                | engine | query                                     |
//! |---------------------|--------|-------------------------------------------|
//! | `search_by_name`    | light  | `{name} {method} api documentation link`  |
//! | `search_by_url`     | light  | `{name} {method_link} api documentation`  |
//! | `ai_search_by_name` | ai     | `{name} {method} api documentation link`  |
//! | `ai_search_by_url`  | ai     | `{name} {method_link} api documentation`  |

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use serde_json::Value;
use tokio::time::Instant;
use tracing::{debug, instrument};
use url::Url;

use super::relevance::ServiceProfile;
use super::until_deadline;
use crate::config::SearchConfig;
use crate::transport::{Fetched, Transport};
use crate::types::{MethodDescriptor, SearchCandidate, TierOutcome};

/// Search engine family behind a slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Engine {
    /// Classic results page; candidates come from `organic_results`.
    Light,
    /// AI answer; candidates come from the cited `references`.
    Ai,
}

impl Engine {
    /// Response key holding this engine's result list.
    #[must_use]
    pub const fn results_key(self) -> &'static str {
        match self {
            Self::Light => "organic_results",
            Self::Ai => "references",
        }
    }
}

/// One of the four web-search queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// Light engine, method name query.
    SearchByName,
    /// Light engine, example URL query.
    SearchByUrl,
    /// AI engine, method name query.
    AiSearchByName,
    /// AI engine, example URL query.
    AiSearchByUrl,
}

impl Slot {
    /// All slots in output column order.
    pub const ALL: [Self; 4] = [
        Self::SearchByName,
        Self::SearchByUrl,
        Self::AiSearchByName,
        Self::AiSearchByUrl,
    ];

    /// Engine this slot queries.
    #[must_use]
    pub const fn engine(self) -> Engine {
        match self {
            Self::SearchByName | Self::SearchByUrl => Engine::Light,
            Self::AiSearchByName | Self::AiSearchByUrl => Engine::Ai,
        }
    }

    /// Query text sent for `descriptor`.
    #[must_use]
    pub fn query(self, descriptor: &MethodDescriptor) -> String {
        match self {
            Self::SearchByName | Self::AiSearchByName => {
                format!("{} {} api documentation link", descriptor.name, descriptor.method)
            },
            Self::SearchByUrl | Self::AiSearchByUrl => {
                format!("{} {} api documentation", descriptor.name, descriptor.example_url)
            },
        }
    }
}

/// Outcomes of the four slots, one field per [`Slot`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct SearchOutcomes {
    pub search_by_name: TierOutcome,
    pub search_by_url: TierOutcome,
    pub ai_search_by_name: TierOutcome,
    pub ai_search_by_url: TierOutcome,
}

impl SearchOutcomes {
    /// Every slot failed.
    #[must_use]
    pub const fn failed() -> Self {
        Self {
            search_by_name: TierOutcome::Failed,
            search_by_url: TierOutcome::Failed,
            ai_search_by_name: TierOutcome::Failed,
            ai_search_by_url: TierOutcome::Failed,
        }
    }
}

/// Result entry as returned by either engine.
#[derive(Debug, Deserialize)]
struct RawResult {
    link: Option<String>,
    title: Option<String>,
    snippet: Option<String>,
}

/// Third discovery tier: four concurrent search-API queries.
#[derive(Clone)]
pub struct WebSearchMultiplexer {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    endpoint: String,
    api_key: String,
    light_engine: String,
    ai_engine: String,
}

impl WebSearchMultiplexer {
    /// Create a multiplexer from the search settings.
    ///
    /// A missing API key is sent as an empty `api_key`; the provider then
    /// answers with an `error` object and every slot fails.
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration, config: &SearchConfig) -> Self {
        Self {
            transport,
            timeout,
            endpoint: config.endpoint.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            light_engine: config.light_engine.clone(),
            ai_engine: config.ai_engine.clone(),
        }
    }

    /// Run all four slots concurrently.
    ///
    /// Slots still running at `deadline` are reported as
    /// [`TierOutcome::Failed`]; slots that finished keep their outcome. No
    /// request is started once `deadline` has passed.
    #[instrument(skip(self, descriptor, deadline), fields(name = %descriptor.name, method = %descriptor.method))]
    pub async fn search_all(&self, descriptor: &MethodDescriptor, deadline: Instant) -> SearchOutcomes {
        if Instant::now() >= deadline {
            debug!("method deadline already passed, skipping web search");
            return SearchOutcomes::failed();
        }

        let profile = ServiceProfile::new(descriptor);
        let [by_name, by_url, ai_by_name, ai_by_url] =
            Slot::ALL.map(|slot| until_deadline(deadline, self.search_slot(slot, descriptor, &profile)));

        let (search_by_name, search_by_url, ai_search_by_name, ai_search_by_url) =
            tokio::join!(by_name, by_url, ai_by_name, ai_by_url);

        SearchOutcomes {
            search_by_name,
            search_by_url,
            ai_search_by_name,
            ai_search_by_url,
        }
    }

    /// Run one slot to completion.
    pub async fn search_slot(
        &self,
        slot: Slot,
        descriptor: &MethodDescriptor,
        profile: &ServiceProfile,
    ) -> TierOutcome {
        let engine = slot.engine();
        let query = slot.query(descriptor);
        let engine_id = match engine {
            Engine::Light => self.light_engine.as_str(),
            Engine::Ai => self.ai_engine.as_str(),
        };

        let Ok(url) = Url::parse_with_params(
            &self.endpoint,
            &[("api_key", self.api_key.as_str()), ("engine", engine_id), ("q", query.as_str())],
        ) else {
            debug!(endpoint = %self.endpoint, "search endpoint is not a valid URL");
            return TierOutcome::Failed;
        };

        let Fetched::Body(body) = self.transport.fetch(url.as_str(), self.timeout).await else {
            debug!(?slot, "search request returned no body");
            return TierOutcome::Failed;
        };

        let Some(candidates) = parse_candidates(&body, engine) else {
            debug!(?slot, "search response rejected");
            return TierOutcome::Failed;
        };

        if candidates.is_empty() {
            return TierOutcome::NotFound;
        }

        match profile.select_best(&candidates) {
            Some(best) => {
                debug!(?slot, url = %best.url, "selected search result");
                TierOutcome::Found(best.url.clone())
            },
            None => {
                debug!(?slot, count = candidates.len(), "no relevant search result");
                TierOutcome::NotFound
            },
        }
    }
}

/// Extract candidates from a search API response.
///
/// Returns `None` when the body is not a JSON object, carries a top-level
/// `error`, or has a malformed result list. A missing result list is an empty one.
/// Entries without a link are dropped; missing titles and snippets are empty.
#[must_use]
pub fn parse_candidates(body: &str, engine: Engine) -> Option<Vec<SearchCandidate>> {
    let Value::Object(map) = serde_json::from_str::<Value>(body).ok()? else {
        return None;
    };
    if map.contains_key("error") {
        return None;
    }

    let Some(results) = map.get(engine.results_key()) else {
        return Some(Vec::new());
    };
    let raw: Vec<RawResult> = serde_json::from_value(results.clone()).ok()?;

    Some(
        raw.into_iter()
            .filter_map(|r| {
                let link = r.link.filter(|l| !l.is_empty())?;
                Some(SearchCandidate::new(
                    link,
                    r.title.unwrap_or_default(),
                    r.snippet.unwrap_or_default(),
                ))
            })
            .collect(),
    )
}
