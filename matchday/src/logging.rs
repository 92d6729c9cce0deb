//! Subscriber setup for the chart tools.
//!
//! The level comes from `MATCHDAY_LOG` (`trace`..`error`, any case) and
//! falls back to INFO. Output goes to stderr so the summary on stdout stays
//! clean for piping.

use std::str::FromStr;

use tracing::Level;

pub const LOG_LEVEL_ENV: &str = "MATCHDAY_LOG";

pub fn init_logging() {
    let requested = std::env::var(LOG_LEVEL_ENV).ok();
    init_logging_with_level(log_level(requested.as_deref()));
}

pub fn init_logging_with_level(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(level >= Level::DEBUG)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Unset, blank or unknown values mean INFO.
pub fn log_level(value: Option<&str>) -> Level {
    value
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .and_then(|x| Level::from_str(x).ok())
        .unwrap_or(Level::INFO)
}
