//! Documentation link discovery for API methods.
//!
//! Discovery runs in tiers, cheapest first:
//!
//! 1. [`DirectPathProbe`] checks well-known manifest paths
//!    (`/openapi.json`, `/swagger.json`, ...) on the API origin.
//! 2. [`CollectionSearch`] looks for a public request collection for the
//!    service.
//! 3. [`WebSearchMultiplexer`] sends four queries to a search API and picks
//!    the most specific relevant result for each ([`relevance`]).
//!
//! Tiers 1 and 2 run together; tier 3 runs only when neither found anything.
//! The [`crate::Pipeline`] owns that decision.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use docfind_core::discovery::DirectPathProbe;
//! use docfind_core::{HttpTransport, TransportConfig};
//!
//! # async fn example() -> docfind_core::Result<()> {
//! let transport = Arc::new(HttpTransport::new(&TransportConfig::default())?);
//! let probe = DirectPathProbe::new(transport, Duration::from_secs(10));
//!
//! if let Some(url) = probe.probe_direct("https://api.zoom.us/v2/users").await.url() {
//!     println!("Manifest: {url}");
//! }
//! # Ok(())
//! # }
//! ```

use std::future::Future;

use tokio::time::Instant;

use crate::types::TierOutcome;

pub mod collection;
pub mod direct;
pub mod host;
pub mod relevance;
pub mod web_search;

pub use collection::CollectionSearch;
pub use direct::{DirectPathProbe, MANIFEST_PATHS};
pub use relevance::ServiceProfile;
pub use web_search::{Engine, SearchOutcomes, Slot, WebSearchMultiplexer};

/// Await `outcome` until `deadline`; an unfinished lookup counts as failed.
pub(crate) async fn until_deadline<F>(deadline: Instant, outcome: F) -> TierOutcome
where
    F: Future<Output = TierOutcome>,
{
    tokio::time::timeout_at(deadline, outcome)
        .await
        .unwrap_or(TierOutcome::Failed)
}
