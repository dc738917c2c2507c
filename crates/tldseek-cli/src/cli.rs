//! # CLI Structure and Argument Parsing
//!
//! `tldseek` has a single mode of operation: read the run configuration and
//! optional cache (normally from the `CONFIG` and `CACHE` environment
//! variables), resolve every site, and print one line on stdout.
//!
//! ```bash
//! CONFIG="$(base64 -w0 sites.json)" CACHE="$PREVIOUS" tldseek
//! tldseek --config "$CONFIG" --raw -v
//! ```
//!
//! Diagnostics go to stderr so stdout stays a single clean value.

use clap::Parser;
use std::time::Duration;
use tldseek_core::ResolverSettings;
use tldseek_core::config::{DEFAULT_PROBE_TEMPLATE, DEFAULT_TLD_LIST_URL};

/// Main CLI structure for the `tldseek` command
#[derive(Parser, Clone, Debug)]
#[command(name = "tldseek")]
#[command(version)]
#[command(
    about = "tldseek - Rediscover which TLD your sites moved to",
    long_about = None
)]
pub struct Cli {
    /// Base64-encoded JSON configuration (`{"sites": [...], "lookup_service": ...}`)
    #[arg(long, value_name = "BASE64", env = "CONFIG", hide_env_values = true)]
    pub config: String,

    /// Base64-encoded `TLD|TLD|...` from a previous run, one slot per site
    #[arg(long, value_name = "BASE64", env = "CACHE", hide_env_values = true)]
    pub cache: Option<String>,

    /// Where to fetch the canonical TLD list
    #[arg(
        long,
        value_name = "URL",
        env = "TLDSEEK_TLD_LIST_URL",
        default_value = DEFAULT_TLD_LIST_URL
    )]
    pub tld_list_url: String,

    /// Probe URL template with `{label}` and `{tld}` placeholders
    #[arg(
        long,
        value_name = "TEMPLATE",
        env = "TLDSEEK_PROBE_TEMPLATE",
        default_value = DEFAULT_PROBE_TEMPLATE
    )]
    pub probe_template: String,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS", default_value_t = 5, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: u64,

    /// Maximum number of sites resolved concurrently
    #[arg(long, value_name = "N", default_value_t = 5, value_parser = parse_positive)]
    pub site_concurrency: usize,

    /// Maximum number of probes in flight per site
    #[arg(long, value_name = "N", default_value_t = 100, value_parser = parse_positive)]
    pub probe_concurrency: usize,

    /// Print the `|`-joined TLDs instead of their base64 encoding
    #[arg(long)]
    pub raw: bool,

    /// Enable debug logging on stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Resolver tuning derived from the flags.
    pub fn resolver_settings(&self) -> ResolverSettings {
        ResolverSettings {
            request_timeout: Duration::from_secs(self.timeout),
            site_concurrency: self.site_concurrency,
            probe_concurrency: self.probe_concurrency,
            probe_template: self.probe_template.clone(),
            tld_list_url: self.tld_list_url.clone(),
        }
    }
}

fn parse_positive(raw: &str) -> Result<usize, String> {
    match raw.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}
