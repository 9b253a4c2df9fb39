//! Logging setup
//!
//! All modules emit `tracing` events. This module installs the process-wide
//! subscriber: `fmt` output on stderr, filtered by an `EnvFilter` built from
//! the configured level, in plain or JSON format.
//!
//! `RUST_LOG`, when set, takes precedence over the configured level.

use tracing_subscriber::EnvFilter;

use crate::config::LogConfig;

const FALLBACK_FILTER: &str = "info";

/// Builds the filter for a config, falling back to `info` on a bad directive
pub fn env_filter(config: &LogConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .unwrap_or_else(|_| EnvFilter::new(FALLBACK_FILTER))
}

/// Installs the global subscriber.
///
/// Returns false if a subscriber was already installed (tests, embedding).
pub fn init_tracing(config: &LogConfig) -> bool {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false);

    let installed = if config.json {
        builder.json().try_init().is_ok()
    } else {
        builder.try_init().is_ok()
    };

    if installed {
        tracing::debug!(level = %config.level, json = config.json, "tracing initialized");
    }
    installed
}
