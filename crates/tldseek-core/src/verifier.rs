//! Bounded concurrent probing of a candidate set.
//!
//! Probes are lazy futures driven through `buffer_unordered`, so at most
//! `max_parallel` are in flight and none starts before a slot frees up. The
//! first `Matched` result returns immediately; dropping the stream cancels
//! every in-flight probe and discards whatever they would have produced.

use crate::config::ResolverSettings;
use crate::http::Fetch;
use crate::validator::{self, ProbeOutcome};
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use tracing::{debug, trace};

/// Confirms which candidate TLD, if any, serves a site.
#[derive(Clone)]
pub struct TldVerifier {
    fetch: Arc<dyn Fetch>,
    settings: Arc<ResolverSettings>,
}

impl TldVerifier {
    /// Create a verifier over a shared transport.
    pub fn new(fetch: Arc<dyn Fetch>, settings: Arc<ResolverSettings>) -> Self {
        Self { fetch, settings }
    }

    /// Probe `candidates` for `label`, returning the first confirmed TLD
    /// (uppercased).
    ///
    /// When several candidates would match, whichever probe finishes first
    /// wins. An empty candidate set issues no requests.
    pub async fn verify(
        &self,
        label: &str,
        candidates: &[String],
        token: &str,
        max_parallel: usize,
    ) -> Option<String> {
        if candidates.is_empty() {
            return None;
        }

        let fetch = self.fetch.as_ref();
        let mut probes = stream::iter(candidates.iter().cloned())
            .map(|tld| async move {
                let url = self.settings.probe_url(label, &tld);
                let outcome = validator::probe(fetch, &url, token).await;
                (tld, url, outcome)
            })
            .buffer_unordered(max_parallel.max(1));

        let mut failures = 0usize;
        while let Some((tld, url, outcome)) = probes.next().await {
            match outcome {
                ProbeOutcome::Matched => {
                    debug!(label, %url, "validator matched");
                    return Some(tld.to_ascii_uppercase());
                },
                ProbeOutcome::NotMatched => trace!(label, %url, "no match"),
                ProbeOutcome::Failed(_) => failures += 1,
            }
        }

        debug!(
            label,
            candidates = candidates.len(),
            failures,
            "no candidate matched"
        );
        None
    }
}
