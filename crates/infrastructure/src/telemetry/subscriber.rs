//! Tracing subscriber setup
//!
//! Console logging to stderr, human-readable or JSON. Stdout stays free for
//! rendered snapshots.

use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{LogFormat, LoggingConfig};

/// Telemetry initialization errors
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),

    /// The filter directive does not parse
    #[error("Invalid log filter '{filter}': {reason}")]
    InvalidFilter {
        /// Directive as configured
        filter: String,
        /// Parser message
        reason: String,
    },
}

/// Build the filter: `RUST_LOG` wins over the configured directive
fn build_filter(directive: &str) -> Result<EnvFilter, TelemetryError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(directive).map_err(|e| TelemetryError::InvalidFilter {
        filter: directive.to_string(),
        reason: e.to_string(),
    })
}

/// Install the global subscriber
///
/// # Errors
///
/// Fails if the filter does not parse or a subscriber is already installed.
pub fn init_tracing(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let filter = build_filter(&config.filter)?;

    match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .json()
                    .with_current_span(true)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    }
    .map_err(|e| TelemetryError::Init(e.to_string()))?;

    debug!(format = %config.format, filter = %config.filter, "Tracing initialized");
    Ok(())
}
