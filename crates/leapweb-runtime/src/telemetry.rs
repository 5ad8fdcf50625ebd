//! Logging setup

use tracing_subscriber::EnvFilter;

use crate::{LoggingConfig, RuntimeError, RuntimeResult};

/// Filter from `RUST_LOG`, falling back to the configured directive
fn env_filter(config: &LoggingConfig) -> RuntimeResult<EnvFilter> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => EnvFilter::try_new(&config.filter)
            .map_err(|e| RuntimeError::Logging(format!("bad filter {:?}: {}", config.filter, e))),
    }
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init_logging(config: &LoggingConfig) -> RuntimeResult<()> {
    let filter = env_filter(config)?;
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let result = if config.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| RuntimeError::Logging(e.to_string()))
}
