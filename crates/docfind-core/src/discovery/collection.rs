//! Public collection search.
//!
//! Two queries are sent to the collection search page, one for the service
//! name and one for its bare host. Both run at the same time and the result is
//! picked by strategy priority, so a slow name query still beats a fast host
//! query when both find something.

use std::sync::{Arc, LazyLock};
use std::time::Duration;

use regex::Regex;
use tracing::{debug, instrument};
use url::Url;

use super::host::{GENERIC_PREFIXES, host_of, strip_prefixes};
use crate::transport::{Fetched, Transport};
use crate::types::{MethodDescriptor, TierOutcome};

static COLLECTION_HREF: LazyLock<Regex> = LazyLock::new(|| {
    #[allow(clippy::expect_used)]
    Regex::new(r#"href="(/[^/"]+/collection/[^"]+)""#).expect("valid collection link regex")
});

/// Second discovery tier: searches public collections for the service.
#[derive(Clone)]
pub struct CollectionSearch {
    transport: Arc<dyn Transport>,
    timeout: Duration,
    endpoint: String,
}

impl CollectionSearch {
    /// Create a search against `endpoint`, which accepts `q`, `scope` and
    /// `type` query parameters.
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration, endpoint: impl Into<String>) -> Self {
        Self {
            transport,
            timeout,
            endpoint: endpoint.into(),
        }
    }

    /// Find a collection for `descriptor`.
    ///
    /// Name query first, host query second. [`TierOutcome::Failed`] only when
    /// both queries failed at the transport level.
    #[instrument(skip(self, descriptor), fields(name = %descriptor.name))]
    pub async fn find_collection(&self, descriptor: &MethodDescriptor) -> TierOutcome {
        let by_name = format!("{} API", descriptor.name);
        let by_host = host_of(&descriptor.example_url)
            .map(|host| strip_prefixes(&host, GENERIC_PREFIXES))
            .filter(|host| !host.is_empty());

        let (name_outcome, host_outcome) = tokio::join!(self.search(&by_name), async {
            match &by_host {
                Some(query) => self.search(query).await,
                None => TierOutcome::NotFound,
            }
        });

        match (name_outcome, host_outcome) {
            (found @ TierOutcome::Found(_), _) | (_, found @ TierOutcome::Found(_)) => found,
            (TierOutcome::Failed, TierOutcome::Failed) => TierOutcome::Failed,
            _ => TierOutcome::NotFound,
        }
    }

    async fn search(&self, query: &str) -> TierOutcome {
        let Ok(url) = Url::parse_with_params(
            &self.endpoint,
            &[("q", query), ("scope", "public"), ("type", "collection")],
        ) else {
            debug!(endpoint = %self.endpoint, "collection endpoint is not a valid URL");
            return TierOutcome::Failed;
        };

        let body = match self.transport.fetch(url.as_str(), self.timeout).await {
            Fetched::Body(body) => body,
            Fetched::Empty => return TierOutcome::NotFound,
            Fetched::Failed => return TierOutcome::Failed,
        };

        match first_collection_path(&body).and_then(|path| url.join(path).ok()) {
            Some(link) => {
                debug!(query, link = %link, "collection found");
                TierOutcome::Found(link.to_string())
            },
            None => TierOutcome::NotFound,
        }
    }
}

/// First `/<workspace>/collection/<id>` link in a search results page.
#[must_use]
pub fn first_collection_path(markup: &str) -> Option<&str> {
    COLLECTION_HREF
        .captures(markup)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
