//! # Interaction Telemetry
//!
//! Structured logging for the Discord interaction gateway.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use interaction_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `INTERACTIONS_SERVICE_NAME` | `interaction-gateway` | Service name in the startup line |
//! | `INTERACTIONS_LOG_LEVEL` | `info` | Log level filter (falls back to `RUST_LOG`) |
//! | `INTERACTIONS_CONSOLE_OUTPUT` | `true` | Write logs to stdout |
//! | `INTERACTIONS_JSON_LOGS` | `false` (`true` in containers) | JSON formatted logs |

#![warn(missing_docs)]

mod config;
mod logging;

pub use config::TelemetryConfig;
pub use logging::build_env_filter;

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// The level filter could not be parsed
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    /// A global subscriber is already installed, or installation failed
    #[error("Failed to install tracing subscriber: {0}")]
    SubscriberInit(String),
}

/// Initialize logging.
///
/// Must be called at most once per process; a second call returns
/// [`TelemetryError::SubscriberInit`].
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    logging::init_logging(config)?;

    tracing::info!(
        service = %config.service_name,
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Telemetry initialized"
    );

    Ok(())
}
