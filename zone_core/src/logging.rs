//! Logging setup for hosts embedding the zone engine.
//!
//! The engine only emits `tracing` events. A host installs a subscriber
//! once, normally from the `[logging]` section of its config.

use crate::config::LoggingConfig;
use crate::{Error, Result};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const ENGINE_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Filter directive giving engine events `level` while other crates stay at warn
pub fn filter_directive(level: &str) -> Result<String> {
    let level: LevelFilter = level
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("Invalid log level {:?}", level)))?;
    Ok(format!(
        "warn,{}={}",
        ENGINE_TARGET,
        level.to_string().to_lowercase()
    ))
}

/// Install the global subscriber for the configured level.
///
/// RUST_LOG takes precedence when set. Installing twice is a no-op, so a
/// host that already owns a subscriber keeps it.
pub fn init(config: &LoggingConfig) -> Result<()> {
    let directive = filter_directive(&config.level)?;
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&directive)
            .map_err(|e| Error::Config(format!("Invalid log filter {:?}: {}", directive, e)))?,
    };

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .try_init();
    Ok(())
}

/// Initialize logging for testing (captures logs for test output)
#[cfg(test)]
pub fn init_test() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_env_filter(EnvFilter::new("debug"))
        .try_init();
}
