//! Logging initialization.
//!
//! Diagnostics (per-layer found/not-found lines, warnings, errors) are written
//! to stderr; stdout is reserved for the single result line.

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use crate::cli::Cli;

/// Map the verbosity flags to a log level.
pub const fn level_for(cli: &Cli) -> Level {
    if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    }
}

/// Install the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the global tracing subscriber cannot be set.
pub fn initialize_logging(cli: &Cli) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(cli))
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use clap::Parser;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["tldseek", "--config", "e30="];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_levels() {
        assert_eq!(level_for(&parse(&[])), Level::INFO);
        assert_eq!(level_for(&parse(&["-v"])), Level::DEBUG);
        assert_eq!(level_for(&parse(&["--quiet"])), Level::ERROR);
    }
}
