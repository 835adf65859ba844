//! Tracing subscriber initialization.
//!
//! Logs go to stderr so stdout carries only JSON output.

use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("tracing subscriber already initialized")]
    SubscriberAlreadySet,
}

/// Install the global subscriber. Respects `RUST_LOG`, defaults to `warn`.
pub fn init() -> Result<(), LoggingError> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|_| LoggingError::SubscriberAlreadySet)
}
