//! Logging setup for the CLI.
//!
//! Events go to stderr so JSON and normal output on stdout stay clean for
//! piping. `RUST_LOG` wins when set; otherwise the filter comes from the
//! quiet/verbose flags, falling back to the configured level.

use tracing_subscriber::EnvFilter;

/// Build the event filter from CLI flags and the configured level.
pub fn env_filter(quiet: bool, verbose: u8, config_level: &str) -> EnvFilter {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => config_level,
            1 => "debug",
            _ => "trace",
        }
    };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Install the global subscriber. Call once at startup.
pub fn init(filter: EnvFilter) {
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
