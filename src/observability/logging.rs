//! # Structured Logging
//!
//! Subscriber setup using `tracing-subscriber`: an `EnvFilter` seeded from
//! the configured log level (overridable via `RUST_LOG`) and either a
//! human-readable or JSON formatter.

use tracing_subscriber::EnvFilter;

use crate::config::ObservabilityConfig;
use crate::errors::{Error, Result};

/// Initialize the global tracing subscriber
///
/// Fails if a subscriber is already installed, which only happens when it is
/// called twice; tests install their own subscribers instead.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| Error::config(format!("Invalid log level '{}': {}", config.log_level, e)))?;

    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_target(true);

    let result = if config.json_logging {
        builder.json().try_init()
    } else {
        builder.try_init()
    };

    result.map_err(|e| Error::config(format!("Failed to initialize logging: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_log_level_is_rejected() {
        let config = ObservabilityConfig {
            log_level: "not-a-level=".to_string(),
            ..Default::default()
        };
        // Either the filter parse fails or a subscriber from another test is
        // already installed; both are errors, never a panic.
        let _ = init_logging(&config);
    }
}
