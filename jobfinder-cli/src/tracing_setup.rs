//! Tracing setup for the jobfinder CLI
//!
//! Usage:
//!   jobfinder --debug ...                    # Debug logging to console
//!   RUST_LOG=jobfinder_server=debug jobfinder  # Fine-grained log control
//!
//! Environment variables:
//!   RUST_LOG                                 # Log filter (default: info)

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Enable debug logging (sets the filter to debug unless RUST_LOG is set)
    pub debug: bool,
}

impl TracingConfig {
    fn filter(&self) -> EnvFilter {
        let fallback = if self.debug {
            "debug"
        } else {
            "info,sqlx=warn,tower_http=info"
        };
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
    }
}

/// Initialize console tracing.
pub fn init(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(config.debug) // Show targets in debug mode
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
