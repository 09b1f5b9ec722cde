//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber
//! - Translate the configured log level into a filter
//!
//! # Design Decisions
//! - `RUST_LOG` wins over the configured level when set
//! - logrus-style names (`warning`, `fatal`, `panic`) are accepted
//! - An unknown level falls back to `debug` and is reported, not fatal

use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Level used when the configured one cannot be parsed.
pub const FALLBACK_LEVEL: Level = Level::DEBUG;

/// Parse an operator-supplied level name.
pub fn parse_level(level: &str) -> Option<Level> {
    match level.trim().to_ascii_lowercase().as_str() {
        "warning" => Some(Level::WARN),
        "fatal" | "panic" => Some(Level::ERROR),
        other => other.parse().ok(),
    }
}

/// Filter directives for this crate and its HTTP middleware at `level`.
fn directives(level: Level) -> String {
    let level = level.as_str().to_ascii_lowercase();
    format!("gitlabber={level},tower_http={level}")
}

/// Install the global subscriber.
///
/// Safe to call more than once; later calls leave the first subscriber in
/// place.
pub fn init_logging(level: &str) {
    let parsed = parse_level(level);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(directives(parsed.unwrap_or(FALLBACK_LEVEL))));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .try_init();

    match parsed {
        Some(level) => tracing::debug!(level = %level, "Log level set"),
        None => tracing::error!(
            level = %level,
            fallback = %FALLBACK_LEVEL,
            "Invalid log level specified, defaulting to debug"
        ),
    }
}
