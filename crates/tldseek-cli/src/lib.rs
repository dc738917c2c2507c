//! tldseek CLI - rediscover which TLD each configured site currently uses.
//!
//! Reads the run configuration and optional cache, resolves every site, and
//! prints the base64-encoded `|`-joined TLDs on stdout.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tldseek_core::{CachedTlds, Config, HttpFetcher, output};
use tracing::debug;

pub mod cli;
pub mod logging;

use cli::Cli;
use logging::initialize_logging;

/// Execute the tldseek CLI with the current arguments and environment.
///
/// # Errors
///
/// Returns an error for malformed input, an unavailable TLD list, or any
/// site that could not be resolved. Nothing is printed to stdout in that case.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    initialize_logging(&cli)?;
    execute(&cli).await
}

async fn execute(cli: &Cli) -> Result<()> {
    let config = Config::from_base64(&cli.config).context("invalid CONFIG payload")?;
    let cache = match cli.cache.as_deref() {
        Some(encoded) => CachedTlds::from_base64(encoded).context("invalid CACHE payload")?,
        None => CachedTlds::empty(),
    };
    debug!(
        sites = config.sites.len(),
        cache_slots = cache.len(),
        lookup = config.lookup_service.is_some(),
        "loaded configuration"
    );

    let settings = cli.resolver_settings();
    let fetch = Arc::new(
        HttpFetcher::with_timeout(settings.request_timeout)
            .context("failed to build HTTP client")?,
    );

    let tlds = tldseek_core::seek(&config, cache, settings, fetch).await?;

    let line = if cli.raw {
        output::join_tlds(&tlds)
    } else {
        output::encode_output(&tlds)
    };
    println!("{line}");
    Ok(())
}
