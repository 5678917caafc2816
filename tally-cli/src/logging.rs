//! Structured logging setup for the CLI.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Install a stderr fmt subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(level).map_err(|e| anyhow!("invalid log level '{level}': {e}"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|e| anyhow!("init logging: {e}"))
}
