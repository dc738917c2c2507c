//! Multi-site resolution.
//!
//! Each site is resolved on its own tokio task; at most `site_concurrency`
//! tasks run at a time, and dropping the run aborts them. Completion order is
//! free, output order follows the configuration. A failing site does not
//! cancel its siblings, but the run as a whole fails if any site is
//! unresolved.

use crate::cache::CachedTlds;
use crate::config::{ResolverSettings, Site};
use crate::http::Fetch;
use crate::resolver::{Resolution, SiteResolver};
use crate::{Error, Result};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Resolves every configured site.
pub struct Coordinator {
    resolver: Arc<SiteResolver>,
    site_concurrency: usize,
}

impl Coordinator {
    /// Create a coordinator.
    ///
    /// `all_tlds` is fetched once by the caller and shared read-only.
    pub fn new(
        fetch: Arc<dyn Fetch>,
        settings: ResolverSettings,
        lookup_service: Option<String>,
        all_tlds: Arc<[String]>,
    ) -> Self {
        let site_concurrency = settings.site_concurrency.max(1);
        let resolver = SiteResolver::new(fetch, Arc::new(settings), lookup_service, all_tlds);
        Self {
            resolver: Arc::new(resolver),
            site_concurrency,
        }
    }

    /// Resolve `sites`, returning one uppercased TLD per site in input order.
    ///
    /// A cache whose length disagrees with `sites` is discarded entirely.
    pub async fn resolve_all(&self, sites: &[Site], cache: CachedTlds) -> Result<Vec<String>> {
        Ok(self
            .resolve_detailed(sites, cache)
            .await?
            .into_iter()
            .map(|resolution| resolution.tld)
            .collect())
    }

    /// Like [`resolve_all`](Self::resolve_all) but keeps the winning layer.
    pub async fn resolve_detailed(
        &self,
        sites: &[Site],
        cache: CachedTlds,
    ) -> Result<Vec<Resolution>> {
        let cached = cache.aligned(sites.len());
        let mut pending = sites.iter().cloned().zip(cached).enumerate();

        // Dropping the set aborts every task still running.
        let mut running = JoinSet::new();
        let mut outcomes: Vec<Option<Result<Resolution>>> =
            std::iter::repeat_with(|| None).take(sites.len()).collect();

        loop {
            while running.len() < self.site_concurrency {
                let Some((index, (site, cached))) = pending.next() else {
                    break;
                };
                let resolver = Arc::clone(&self.resolver);
                running.spawn(async move {
                    let outcome = resolver.resolve(index + 1, &site, cached.as_deref()).await;
                    (index, outcome)
                });
            }

            let Some(joined) = running.join_next().await else {
                break;
            };
            let (index, outcome) = joined.map_err(|join_err| {
                Error::Other(format!("site resolution task failed: {join_err}"))
            })?;
            debug!(site = index + 1, ok = outcome.is_ok(), "site finished");
            outcomes[index] = Some(outcome);
        }

        let mut resolved = Vec::with_capacity(sites.len());
        let mut failures = Vec::new();
        for (index, outcome) in outcomes.into_iter().enumerate() {
            let position = index + 1;
            match outcome {
                Some(Ok(resolution)) => resolved.push(resolution),
                Some(Err(err)) => {
                    error!(site = position, category = err.category(), "{err}");
                    failures.push(err);
                },
                None => failures.push(Error::Other(format!(
                    "site #{position} produced no outcome"
                ))),
            }
        }

        match failures.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(resolved),
        }
    }
}
