//! Tracing setup for the coffeehouse CLI
//!
//! Usage:
//!   coffeehouse --debug ...                   # Debug logging to stderr
//!   RUST_LOG=coffeehouse_core=debug coffeehouse  # Fine-grained log control
//!
//! Logs go to stderr so `drinks --format json` output stays clean on stdout.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    pub debug: bool,
}

pub fn init(config: &TracingConfig) -> Result<()> {
    let filter = if config.debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.debug) // Show targets in debug mode
        .with_writer(std::io::stderr)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
