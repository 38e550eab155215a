//! Per-method orchestration of the discovery tiers and batch execution.
//!
//! For each descriptor the pipeline:
//!
//! 1. runs [`DirectPathProbe`] and [`CollectionSearch`] together;
//! 2. stops there when either found a link, leaving the other tier-1 field and
//!    all web fields empty;
//! 3. otherwise runs the four [`WebSearchMultiplexer`] slots and records every
//!    outcome.
//!
//! All lookups of a method share one deadline. Lookups still running when it
//! passes are recorded as failed; lookups that already finished keep their
//! result. Nothing a tier does can fail the method as a whole, and nothing a
//! method does can affect another method in the batch.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{error, info, instrument, warn};

use crate::config::Config;
use crate::discovery::{CollectionSearch, DirectPathProbe, WebSearchMultiplexer, until_deadline};
use crate::transport::Transport;
use crate::types::{DiscoveryFields, FieldOutcome, MethodDescriptor, ProcessingResult, TierOutcome};

/// Called once for every method that finishes, in completion order.
pub type ProgressCallback = Arc<dyn Fn(&ProcessingResult) + Send + Sync>;

/// Tiered discovery for single methods and batches.
///
/// Holds no global state; any number of pipelines can share one transport.
pub struct Pipeline {
    direct: DirectPathProbe,
    collection: CollectionSearch,
    web: WebSearchMultiplexer,
    method_timeout: Duration,
    progress: Option<ProgressCallback>,
}

impl Pipeline {
    /// Build a pipeline whose tiers all use `transport`.
    pub fn new(transport: Arc<dyn Transport>, config: &Config) -> Self {
        let request_timeout = config.transport.request_timeout();
        Self {
            direct: DirectPathProbe::new(Arc::clone(&transport), request_timeout),
            collection: CollectionSearch::new(
                Arc::clone(&transport),
                request_timeout,
                config.collection.endpoint.clone(),
            ),
            web: WebSearchMultiplexer::new(transport, request_timeout, &config.search),
            method_timeout: config.pipeline.method_timeout(),
            progress: None,
        }
    }

    /// Report each finished method to `callback`.
    #[must_use]
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Resolve all six discovery fields for one method.
    ///
    /// A descriptor that fails [`MethodDescriptor::validate`] yields a result
    /// with every field failed.
    #[instrument(skip(self, descriptor), fields(name = %descriptor.name, method = %descriptor.method))]
    pub async fn process(&self, descriptor: &MethodDescriptor) -> ProcessingResult {
        if let Err(e) = descriptor.validate() {
            warn!(error = %e, "cannot process method");
            return ProcessingResult::failed(descriptor.clone());
        }

        let deadline = Instant::now() + self.method_timeout;

        let (direct, collection) = tokio::join!(
            until_deadline(deadline, self.direct.probe_direct(&descriptor.example_url)),
            until_deadline(deadline, self.collection.find_collection(descriptor)),
        );

        let fields = if direct.is_found() || collection.is_found() {
            DiscoveryFields {
                openapi_link: found_or_empty(direct),
                postman_link: found_or_empty(collection),
                ..DiscoveryFields::default()
            }
        } else {
            let web = self.web.search_all(descriptor, deadline).await;
            DiscoveryFields {
                openapi_link: direct.into(),
                postman_link: collection.into(),
                search_by_name: web.search_by_name.into(),
                search_by_url: web.search_by_url.into(),
                ai_search_by_name: web.ai_search_by_name.into(),
                ai_search_by_url: web.ai_search_by_url.into(),
            }
        };

        let result = ProcessingResult::new(descriptor.clone(), fields);
        if result.has_link() {
            info!("documentation found");
        } else {
            info!("no documentation found");
        }
        result
    }

    /// Process every descriptor concurrently.
    ///
    /// One task is spawned per descriptor up front; the transport's permit
    /// pool limits how much of that work is on the network at once. The
    /// returned results are in input order, one per descriptor.
    pub async fn run_batch(self: Arc<Self>, descriptors: Vec<MethodDescriptor>) -> Vec<ProcessingResult> {
        info!(count = descriptors.len(), "processing methods");

        let tasks: Vec<_> = descriptors
            .into_iter()
            .map(|descriptor| {
                let pipeline = Arc::clone(&self);
                let task_descriptor = descriptor.clone();
                let handle = tokio::spawn(async move {
                    let result = pipeline.process(&task_descriptor).await;
                    pipeline.report(&result);
                    result
                });
                (descriptor, handle)
            })
            .collect();

        let mut results = Vec::with_capacity(tasks.len());
        for (descriptor, handle) in tasks {
            let result = match handle.await {
                Ok(result) => result,
                Err(e) => {
                    error!(name = %descriptor.name, method = %descriptor.method, error = %e, "method task aborted");
                    let result = ProcessingResult::failed(descriptor);
                    self.report(&result);
                    result
                },
            };
            results.push(result);
        }
        results
    }

    fn report(&self, result: &ProcessingResult) {
        if let Some(progress) = &self.progress {
            progress(result);
        }
    }
}

/// Tier-1 field when the other tier-1 lookup won; its failure is not reported.
fn found_or_empty(outcome: TierOutcome) -> FieldOutcome {
    match outcome {
        TierOutcome::Found(url) => FieldOutcome::Found(url),
        TierOutcome::NotFound | TierOutcome::Failed => FieldOutcome::NotFound,
    }
}
