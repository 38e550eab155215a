//! Direct probing for machine-readable API descriptions.
//!
//! Many APIs publish their OpenAPI/Swagger document at a well-known path on
//! the same origin that serves the API. Checking those paths costs a handful
//! of HEAD requests, far less than a search query, so this is the first tier.
//!
//! ## Probe Order
//!
//! For an example URL `https://api.example.com/v1/items` the origin
//! `https://api.example.com` is checked for, in order:
//!
//! 1. `/openapi.json`
//! 2. `/openapi.yaml`
//! 3. `/swagger.json`
//! 4. `/swagger.yaml`
//! 5. `/api-docs`
//! 6. `/redoc`
//!
//! The first path that exists wins.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, instrument};

use super::host::origin_of;
use crate::transport::{Fetched, ProbeStatus, Transport};
use crate::types::TierOutcome;

/// Manifest paths checked on the example URL's origin, highest priority first.
pub const MANIFEST_PATHS: &[&str] = &[
    "/openapi.json",
    "/openapi.yaml",
    "/swagger.json",
    "/swagger.yaml",
    "/api-docs",
    "/redoc",
];

/// First discovery tier: probes well-known manifest paths on the API origin.
#[derive(Clone)]
pub struct DirectPathProbe {
    transport: Arc<dyn Transport>,
    timeout: Duration,
}

impl DirectPathProbe {
    /// Create a probe issuing requests with the given per-request timeout.
    pub fn new(transport: Arc<dyn Transport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    /// Look for a manifest on the origin of `example_url`.
    ///
    /// Returns [`TierOutcome::Failed`] only when the URL has no usable origin.
    /// Transport errors on individual paths count as "not there".
    #[instrument(skip(self))]
    pub async fn probe_direct(&self, example_url: &str) -> TierOutcome {
        let Some(origin) = origin_of(example_url) else {
            debug!("example URL has no http(s) origin");
            return TierOutcome::Failed;
        };

        for path in MANIFEST_PATHS {
            let candidate = format!("{origin}{path}");
            if self.path_exists(&candidate).await {
                debug!(url = %candidate, "manifest found");
                return TierOutcome::Found(candidate);
            }
        }

        TierOutcome::NotFound
    }

    /// HEAD first; anything other than 200 or 404 (e.g. 405 from servers that
    /// reject HEAD) falls back to a GET where a non-empty body counts.
    async fn path_exists(&self, url: &str) -> bool {
        match self.transport.probe(url, self.timeout).await {
            ProbeStatus::Status(200) => true,
            ProbeStatus::Status(404) | ProbeStatus::Failed => false,
            ProbeStatus::Status(status) => {
                debug!(url, status, "inconclusive probe, fetching");
                matches!(self.transport.fetch(url, self.timeout).await, Fetched::Body(_))
            },
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::config::TransportConfig;
    use crate::transport::HttpTransport;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn probe() -> DirectPathProbe {
        let transport = HttpTransport::new(&TransportConfig::default()).unwrap();
        DirectPathProbe::new(Arc::new(transport), Duration::from_secs(5))
    }

    #[tokio::test]
    async fn test_finds_first_manifest_in_priority_order() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/swagger.json"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        Mock::given(method("HEAD"))
            .and(path("/redoc"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let example = format!("{}/v2/users/me/meetings", mock_server.uri());
        let outcome = probe().probe_direct(&example).await;

        assert_eq!(
            outcome,
            TierOutcome::Found(format!("{}/swagger.json", mock_server.uri()))
        );
    }

    #[tokio::test]
    async fn test_all_missing_is_not_found() {
        let mock_server = MockServer::start().await;
        // unmatched requests get 404 from wiremock
        let example = format!("{}/v1/items", mock_server.uri());
        assert_eq!(probe().probe_direct(&example).await, TierOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_head_not_allowed_falls_back_to_get() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/openapi.json"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/openapi.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"openapi":"3.0.0"}"#))
            .expect(1)
            .mount(&mock_server)
            .await;

        let example = format!("{}/v1/items", mock_server.uri());
        let outcome = probe().probe_direct(&example).await;

        assert_eq!(
            outcome,
            TierOutcome::Found(format!("{}/openapi.json", mock_server.uri()))
        );
    }

    #[tokio::test]
    async fn test_inconclusive_probe_with_empty_body_moves_on() {
        let mock_server = MockServer::start().await;

        Mock::given(method("HEAD"))
            .and(path("/openapi.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/openapi.json"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        Mock::given(method("HEAD"))
            .and(path("/api-docs"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let example = format!("{}/v1/items", mock_server.uri());
        let outcome = probe().probe_direct(&example).await;

        assert_eq!(outcome, TierOutcome::Found(format!("{}/api-docs", mock_server.uri())));
    }

    #[tokio::test]
    async fn test_not_found_skips_get() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("should not be read"))
            .expect(0)
            .mount(&mock_server)
            .await;

        let example = format!("{}/v1/items", mock_server.uri());
        assert_eq!(probe().probe_direct(&example).await, TierOutcome::NotFound);
    }

    #[tokio::test]
    async fn test_unparseable_url_fails() {
        assert_eq!(probe().probe_direct("api.zoom.us/v2").await, TierOutcome::Failed);
        assert_eq!(probe().probe_direct("").await, TierOutcome::Failed);
    }

    #[tokio::test]
    async fn test_unreachable_origin_is_not_found() {
        let probe = {
            let transport = HttpTransport::new(&TransportConfig::default()).unwrap();
            DirectPathProbe::new(Arc::new(transport), Duration::from_millis(200))
        };
        assert_eq!(
            probe.probe_direct("http://127.0.0.1:9/v1").await,
            TierOutcome::NotFound
        );
    }
}
