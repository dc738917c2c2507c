//! Per-site layered resolution.
//!
//! Layers run strictly in order and the first confirmed TLD ends the search:
//!
//! 1. **cache** - the caller's previous answer, verified alone
//! 2. **fastpath** - suffixes scraped from the site's index page
//! 3. **lookup** - suffixes from the configured lookup service
//! 4. **all tlds** - the full canonical list
//!
//! Found/not-found diagnostics are logged per layer with the site's 1-based
//! position; they never reach the result.

use crate::config::{ResolverSettings, Site};
use crate::extract;
use crate::http::Fetch;
use crate::verifier::TldVerifier;
use crate::{Error, Result};
use std::fmt;
use std::sync::Arc;
use tracing::info;

/// One resolution strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layer {
    /// Previously known answer.
    Cache,
    /// Index page scrape.
    FastPath,
    /// External lookup service.
    Lookup,
    /// Every known TLD.
    Exhaustive,
}

impl Layer {
    /// Short name used in diagnostics.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cache => "cache",
            Self::FastPath => "fastpath",
            Self::Lookup => "lookup",
            Self::Exhaustive => "all tlds",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A confirmed TLD and the layer that confirmed it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Uppercased TLD.
    pub tld: String,
    /// Layer that produced the match.
    pub layer: Layer,
}

/// Resolves single sites. Cheap to share behind an `Arc`.
pub struct SiteResolver {
    fetch: Arc<dyn Fetch>,
    verifier: TldVerifier,
    settings: Arc<ResolverSettings>,
    lookup_service: Option<String>,
    all_tlds: Arc<[String]>,
}

impl SiteResolver {
    /// Create a resolver.
    ///
    /// `all_tlds` is the canonical list, shared read-only by every site.
    pub fn new(
        fetch: Arc<dyn Fetch>,
        settings: Arc<ResolverSettings>,
        lookup_service: Option<String>,
        all_tlds: Arc<[String]>,
    ) -> Self {
        let verifier = TldVerifier::new(Arc::clone(&fetch), Arc::clone(&settings));
        Self {
            fetch,
            verifier,
            settings,
            lookup_service,
            all_tlds,
        }
    }

    /// Resolve the site at 1-based `position`.
    ///
    /// Fails with [`Error::Unresolved`] once every applicable layer has been
    /// exhausted.
    pub async fn resolve(
        &self,
        position: usize,
        site: &Site,
        cached: Option<&str>,
    ) -> Result<Resolution> {
        if let Some(tld) = cached.map(str::trim).filter(|tld| !tld.is_empty()) {
            let candidates = [tld.to_ascii_uppercase()];
            if let Some(found) = self.attempt(position, Layer::Cache, site, &candidates).await {
                return Ok(found);
            }
        }

        if let Some(fast_path) = site.fast_path.as_deref() {
            let candidates =
                extract::extract_fast_path(self.fetch.as_ref(), fast_path, &site.label).await;
            if let Some(found) = self.attempt(position, Layer::FastPath, site, &candidates).await {
                return Ok(found);
            }
        }

        if let Some(base) = self.lookup_service.as_deref() {
            let candidates = extract::extract_lookup(self.fetch.as_ref(), base, &site.label).await;
            if let Some(found) = self.attempt(position, Layer::Lookup, site, &candidates).await {
                return Ok(found);
            }
        }

        if let Some(found) = self
            .attempt(position, Layer::Exhaustive, site, &self.all_tlds)
            .await
        {
            return Ok(found);
        }

        Err(Error::Unresolved { position })
    }

    async fn attempt(
        &self,
        position: usize,
        layer: Layer,
        site: &Site,
        candidates: &[String],
    ) -> Option<Resolution> {
        let found = self
            .verifier
            .verify(
                &site.label,
                candidates,
                &site.validator,
                self.settings.probe_concurrency,
            )
            .await;

        match found {
            Some(tld) => {
                info!(site = position, %layer, %tld, "Site #{position} found in {layer}");
                Some(Resolution { tld, layer })
            },
            None => {
                info!(
                    site = position,
                    %layer,
                    candidates = candidates.len(),
                    "Site #{position} not found in {layer}"
                );
                None
            },
        }
    }
}
