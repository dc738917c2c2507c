//! Previously resolved TLDs supplied by the caller.
//!
//! The cache is a `|`-separated list with one slot per configured site,
//! usually delivered base64-encoded through the `CACHE` environment variable.
//! Nothing is written back; the caller stores the next run's output itself.

use crate::Result;
use crate::config::decode_base64_text;
use tracing::warn;

/// Slot separator shared with the run output.
pub const SEPARATOR: char = '|';

/// Cached TLD per site position. Empty slots hold `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CachedTlds {
    slots: Vec<Option<String>>,
}

impl CachedTlds {
    /// A cache with no slots.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from explicit slots, normalising each TLD.
    pub fn from_slots(slots: Vec<Option<String>>) -> Self {
        Self {
            slots: slots
                .into_iter()
                .map(|slot| slot.and_then(|tld| normalize(&tld)))
                .collect(),
        }
    }

    /// Parse a `TLD|TLD|...` string.
    ///
    /// ```rust
    /// use tldseek_core::CachedTlds;
    ///
    /// let cache = CachedTlds::parse("com||.io\n");
    /// assert_eq!(cache.slots(), &[Some("COM".to_string()), None, Some("IO".to_string())]);
    /// ```
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        if text.is_empty() {
            return Self::empty();
        }
        Self {
            slots: text.split(SEPARATOR).map(normalize).collect(),
        }
    }

    /// Decode a base64 payload and parse it.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        Ok(Self::parse(&decode_base64_text(encoded)?))
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether there are no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Raw slot view.
    pub fn slots(&self) -> &[Option<String>] {
        &self.slots
    }

    /// Slots aligned to `site_count` sites.
    ///
    /// A length mismatch means the cache cannot be trusted at all, so every
    /// site is treated as a cache miss rather than pairing slots by index.
    /// An empty cache (nothing supplied) is all misses without a warning.
    pub fn aligned(self, site_count: usize) -> Vec<Option<String>> {
        if self.slots.len() == site_count {
            return self.slots;
        }
        if self.slots.is_empty() {
            return vec![None; site_count];
        }
        warn!(
            cache_len = self.slots.len(),
            sites_len = site_count,
            "Cache length does not match sites length. Cache len:{} != Sites len:{}. Skipping it",
            self.slots.len(),
            site_count
        );
        vec![None; site_count]
    }
}

fn normalize(raw: &str) -> Option<String> {
    let tld = raw.trim().trim_start_matches('.');
    if tld.is_empty() {
        None
    } else {
        Some(tld.to_ascii_uppercase())
    }
}
