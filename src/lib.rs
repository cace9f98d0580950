//! MQTT presence telemetry console logger.
//!
//! Subscribes to a broker topic carrying radar presence telemetry, decodes
//! each JSON payload, and prints one color-coded line per event:
//!
//! - [`decode`] - payload decoding into a [`decode::SensorRecord`]
//! - [`palette`] - stable node-id to color assignment
//! - [`format`] - status-aware display line formatting
//! - [`dispatch`] - connection and message event dispatch
//! - [`transport`] - MQTT collaborator (rumqttc)
//! - [`config`] - configuration loading (JSON5 format)
//! - [`error`] - error types

pub mod config;
pub mod decode;
pub mod dispatch;
pub mod error;
pub mod format;
pub mod palette;
pub mod transport;

// Re-export commonly used types at the crate root
pub use config::{DisplayConfig, LogFormat, LoggerConfig, LoggingConfig, MqttConfig};
pub use decode::{SensorRecord, Status};
pub use dispatch::{ConnectDecision, EventDispatcher};
pub use error::{DecodeError, LoggerError, Result};
pub use format::format_line;
pub use palette::{Color, color_for, default_palette};

/// Initialize tracing with the given configuration.
///
/// Supports two output formats:
/// - `LogFormat::Text` (default): Human-readable text format
/// - `LogFormat::Json`: Structured JSON format for log aggregation systems
///
/// The `RUST_LOG` environment variable overrides the configured level.
pub fn init_tracing(config: &LoggingConfig) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    match config.format {
        LogFormat::Text => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr))
                .with(filter)
                .try_init()
                .map_err(|e| LoggerError::config(format!("Failed to initialize tracing: {}", e)))?;
        }
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .with(filter)
                .try_init()
                .map_err(|e| LoggerError::config(format!("Failed to initialize tracing: {}", e)))?;
        }
    }

    Ok(())
}
