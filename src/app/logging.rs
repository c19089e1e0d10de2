//! Logging setup

use tracing_subscriber::EnvFilter;

use super::config::LoggingConfig;

/// Installs the global `tracing` subscriber
///
/// `RUST_LOG` wins over the configured filter when it is set. Fails if a
/// subscriber was already installed.
pub fn init(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.filter))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(config.with_target)
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
}
