//! Logging infrastructure for the RAG assistant.
//!
//! This module initializes the tracing subscriber for structured logging.
//! All logs are emitted to stderr to keep stdout clean for answers and
//! JSON output.

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::error::{AppError, AppResult};

/// Initialize the tracing subscriber with stderr output.
///
/// This sets up structured logging with:
/// - Output to stderr (stdout is reserved for data)
/// - Environment-based filtering (provided level, else RUST_LOG, else info)
/// - Human-readable or JSON line format
/// - Optional ANSI color control
///
/// # Example
/// ```no_run
/// use ragassist_core::logging::init_logging;
///
/// init_logging(None, false, false).expect("Failed to initialize logging");
/// ```
pub fn init_logging(log_level: Option<&str>, no_color: bool, json: bool) -> AppResult<()> {
    let env_filter = build_filter(log_level)?;

    let registry = tracing_subscriber::registry().with(env_filter);

    let result = if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_current_span(true),
            )
            .try_init()
    } else {
        registry
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_level(true)
                    .with_ansi(!no_color && supports_color()),
            )
            .try_init()
    };

    result.map_err(|e| AppError::Config(format!("Failed to init logging: {}", e)))
}

/// Build the level filter from an explicit level or the environment.
fn build_filter(log_level: Option<&str>) -> AppResult<EnvFilter> {
    let default_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
    let filter_str = log_level.unwrap_or(&default_level);

    EnvFilter::try_new(filter_str)
        .map_err(|e| AppError::Config(format!("Invalid log filter: {}", e)))
}

/// Check if the terminal supports color output.
fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
}
