//! Configuration for a tldseek run.
//!
//! Two layers of configuration exist:
//!
//! 1. [`Config`] - *what* to resolve: the ordered site list and an optional
//!    lookup service. Supplied as base64-encoded JSON, usually through the
//!    `CONFIG` environment variable.
//! 2. [`ResolverSettings`] - *how* to resolve: timeouts, concurrency bounds,
//!    the probe URL template and the TLD list source.
//!
//! ## Configuration format
//!
//! ```json
//! {
//!   "sites": [
//!     { "domain": "example", "validator": "<title>Example", "fast_path": "https://links.example.org" }
//!   ],
//!   "lookup_service": "https://lookup.example.org"
//! }
//! ```
//!
//! ```rust
//! use tldseek_core::Config;
//!
//! let config = Config::from_json(r#"{"sites":[{"domain":"foo","validator":"X123"}]}"#)?;
//! assert_eq!(config.sites[0].label, "foo");
//! assert!(config.lookup_service.is_none());
//! # Ok::<(), tldseek_core::Error>(())
//! ```

use crate::{Error, Result};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;

/// Canonical IANA list of delegated TLDs.
pub const DEFAULT_TLD_LIST_URL: &str = "https://data.iana.org/TLD/tlds-alpha-by-domain.txt";

/// Default probe URL template.
pub const DEFAULT_PROBE_TEMPLATE: &str = "https://{label}.{tld}";

/// One configured target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Second-level domain label, without dots.
    #[serde(rename = "domain", alias = "label")]
    pub label: String,

    /// Literal text a valid response body must contain.
    pub validator: String,

    /// Index page likely to mention the site's current domain.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fast_path: Option<String>,
}

/// Sites to resolve plus the optional lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Sites in output order.
    pub sites: Vec<Site>,

    /// Base URL of a service answering `<base>/<label>` with candidate TLDs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lookup_service: Option<String>,
}

impl Config {
    /// Parse and validate a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        let config = config.normalized();
        config.validate()?;
        Ok(config)
    }

    /// Decode a base64 payload and parse it as a JSON configuration.
    pub fn from_base64(encoded: &str) -> Result<Self> {
        let json = decode_base64_text(encoded)?;
        Self::from_json(json.trim())
    }

    /// Blank optional URLs mean "not configured".
    fn normalized(mut self) -> Self {
        self.lookup_service = non_blank(self.lookup_service);
        for site in &mut self.sites {
            site.fast_path = non_blank(site.fast_path.take());
        }
        self
    }

    /// Check every site and URL before any network activity.
    pub fn validate(&self) -> Result<()> {
        for (index, site) in self.sites.iter().enumerate() {
            let position = index + 1;
            if site.label.trim().is_empty() {
                return Err(Error::Config(format!("site #{position} has an empty domain")));
            }
            if !is_dns_label(&site.label) {
                return Err(Error::Config(format!(
                    "site #{position} domain '{}' must be a bare label of letters, digits and inner hyphens",
                    site.label
                )));
            }
            if site.validator.is_empty() {
                return Err(Error::Config(format!(
                    "site #{position} has an empty validator"
                )));
            }
            if let Some(fast_path) = &site.fast_path {
                validate_http_url(fast_path)?;
            }
        }

        if let Some(lookup) = &self.lookup_service {
            validate_http_url(lookup)?;
        }

        Ok(())
    }
}

/// Runtime tuning for resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverSettings {
    /// Timeout applied to every individual HTTP request.
    pub request_timeout: Duration,
    /// Maximum number of sites resolved at once.
    pub site_concurrency: usize,
    /// Maximum number of probes in flight within one layer of one site.
    pub probe_concurrency: usize,
    /// Probe URL with `{label}` and `{tld}` placeholders.
    pub probe_template: String,
    /// Where the canonical TLD list is fetched from.
    pub tld_list_url: String,
}

impl Default for ResolverSettings {
    fn default() -> Self {
        Self {
            request_timeout: crate::http::DEFAULT_TIMEOUT,
            site_concurrency: 5,
            probe_concurrency: 100,
            probe_template: DEFAULT_PROBE_TEMPLATE.to_string(),
            tld_list_url: DEFAULT_TLD_LIST_URL.to_string(),
        }
    }
}

impl ResolverSettings {
    /// Reject settings that would stall or mis-address probes.
    pub fn validate(&self) -> Result<()> {
        if self.site_concurrency == 0 {
            return Err(Error::Config("site concurrency must be at least 1".into()));
        }
        if self.probe_concurrency == 0 {
            return Err(Error::Config("probe concurrency must be at least 1".into()));
        }
        if !self.probe_template.contains("{label}") || !self.probe_template.contains("{tld}") {
            return Err(Error::Config(format!(
                "probe template '{}' must contain {{label}} and {{tld}}",
                self.probe_template
            )));
        }
        validate_http_url(&self.tld_list_url)
    }

    /// Build the probe URL for one candidate. The TLD is lowercased.
    ///
    /// ```rust
    /// use tldseek_core::ResolverSettings;
    ///
    /// let settings = ResolverSettings::default();
    /// assert_eq!(settings.probe_url("foo", "DEV"), "https://foo.dev");
    /// ```
    pub fn probe_url(&self, label: &str, tld: &str) -> String {
        self.probe_template
            .replace("{label}", label)
            .replace("{tld}", &tld.to_ascii_lowercase())
    }
}

/// Decode a standard base64 payload into UTF-8 text.
pub fn decode_base64_text(encoded: &str) -> Result<String> {
    let bytes = STANDARD.decode(encoded.trim())?;
    Ok(String::from_utf8(bytes)?)
}

fn validate_http_url(raw: &str) -> Result<()> {
    let parsed = Url::parse(raw)?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => Err(Error::InvalidUrl(format!(
            "'{raw}' uses unsupported scheme '{other}'"
        ))),
    }
}

/// `[A-Za-z0-9-]+` without a leading or trailing hyphen, at most 63 bytes.
fn is_dns_label(label: &str) -> bool {
    !label.is_empty()
        && label.len() <= 63
        && !label.starts_with('-')
        && !label.ends_with('-')
        && label.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-')
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
