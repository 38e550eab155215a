//! Bounded-concurrency HTTP transport used by every discovery tier.
//!
//! The tiers only ever see the [`Transport`] trait: a lightweight existence
//! check ([`Transport::probe`]) and a body download ([`Transport::fetch`]).
//! Neither operation returns an error; every failure mode is folded into the
//! returned value so callers can decide what "could not look" means for them.
//!
//! [`HttpTransport`] is the production implementation. A single
//! [`tokio::sync::Semaphore`] caps requests in flight across the whole batch.
//! Each call acquires its own permit, so a method that fans out into several
//! requests never needs more than one permit at a time and cannot deadlock
//! against the cap. Tokio semaphores hand out permits in FIFO order.

use crate::config::TransportConfig;
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tracing::debug;

/// Outcome of a HEAD-style existence check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// The server answered with this status code.
    Status(u16),
    /// No answer: timeout, connection or TLS failure.
    Failed,
}

/// Outcome of a GET request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched {
    /// Successful response with a non-empty body.
    Body(String),
    /// Successful response with an empty body.
    Empty,
    /// Timeout, network failure or non-success status.
    Failed,
}

/// Fetch/probe primitive consumed by the discovery tiers.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Check whether `url` exists without downloading it.
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeStatus;

    /// Download `url`.
    async fn fetch(&self, url: &str, timeout: Duration) -> Fetched;
}

/// Shared reqwest client with a global concurrency cap.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    permits: Arc<Semaphore>,
}

impl HttpTransport {
    /// Build the transport from configuration.
    ///
    /// This is the only place the network layer can fail hard; a batch that
    /// cannot build its transport cannot start any method.
    pub fn new(config: &TransportConfig) -> Result<Self> {
        if config.max_concurrent == 0 {
            return Err(Error::Config("transport.max_concurrent must be at least 1".into()));
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .user_agent(config.user_agent.clone())
            .pool_max_idle_per_host(config.max_concurrent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .gzip(true)
            .brotli(true)
            .build()
            .map_err(Error::Network)?;

        Ok(Self {
            client,
            permits: Arc::new(Semaphore::new(config.max_concurrent)),
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn probe(&self, url: &str, timeout: Duration) -> ProbeStatus {
        let Ok(_permit) = self.permits.acquire().await else {
            return ProbeStatus::Failed;
        };

        match self.client.head(url).timeout(timeout).send().await {
            Ok(response) => ProbeStatus::Status(response.status().as_u16()),
            Err(e) => {
                debug!(url, error = %e, "probe failed");
                ProbeStatus::Failed
            },
        }
    }

    async fn fetch(&self, url: &str, timeout: Duration) -> Fetched {
        let Ok(_permit) = self.permits.acquire().await else {
            return Fetched::Failed;
        };

        let response = match self.client.get(url).timeout(timeout).send().await {
            Ok(response) => response,
            Err(e) => {
                debug!(url, error = %e, "fetch failed");
                return Fetched::Failed;
            },
        };

        let status = response.status();
        if !status.is_success() {
            debug!(url, status = status.as_u16(), "fetch returned non-success status");
            return Fetched::Failed;
        }

        match response.text().await {
            Ok(body) if body.is_empty() => Fetched::Empty,
            Ok(body) => Fetched::Body(body),
            Err(e) => {
                debug!(url, error = %e, "failed to read response body");
                Fetched::Failed
            },
        }
    }
}
