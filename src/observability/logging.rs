//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable via `RUST_LOG`
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - Logs go to stderr so command output on stdout stays clean
//! - Safe to call more than once (later calls are no-ops)

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Default filter directive for a configured level.
pub fn default_filter(level: &str) -> String {
    format!("json_mock_api={level},tower_http={level}")
}

/// Install the global subscriber.
pub fn init_logging(level: &str) {
    let result = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter(level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();

    if result.is_err() {
        tracing::debug!("Logging already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter("debug"), "json_mock_api=debug,tower_http=debug");
    }

    #[test]
    fn test_init_twice_is_harmless() {
        init_logging("info");
        init_logging("debug");
    }
}
