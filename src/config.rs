//! Logger configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{LoggerError, Result};
use crate::palette::{Color, default_palette};

/// Complete logger configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggerConfig {
    /// MQTT broker connection settings.
    pub mqtt: MqttConfig,

    /// Console display settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// MQTT broker connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    /// Broker hostname or IP address. Required.
    pub host: String,

    /// Broker port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Client identifier presented to the broker.
    #[serde(default = "default_client_id")]
    pub client_id: String,

    /// Topic carrying the presence telemetry.
    #[serde(default = "default_topic")]
    pub topic: String,

    /// Keep-alive interval in seconds.
    #[serde(default = "default_keep_alive_secs")]
    pub keep_alive_secs: u64,
}

fn default_port() -> u16 {
    1883
}

fn default_client_id() -> String {
    "presence-logger".to_string()
}

fn default_topic() -> String {
    "sensors/radar/status".to_string()
}

fn default_keep_alive_secs() -> u64 {
    60
}

/// Console display settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Node colors, cycled by node id. Must contain at least one color.
    #[serde(default = "default_palette")]
    pub palette: Vec<Color>,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            palette: default_palette(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable text format (default).
    #[default]
    Text,
    /// Structured JSON format.
    Json,
}

/// Logging configuration for diagnostics (not the event lines themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format: "text" or "json".
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl LoggerConfig {
    /// Load configuration from a JSON5 file and validate it.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(LoggerError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = json5::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration. Fails before any connection is attempted.
    pub fn validate(&self) -> Result<()> {
        if self.mqtt.host.trim().is_empty() {
            return Err(LoggerError::config(
                "MQTT broker host is not set; edit the configuration file",
            ));
        }

        if self.mqtt.topic.trim().is_empty() {
            return Err(LoggerError::config("MQTT topic must not be empty"));
        }

        if self.display.palette.is_empty() {
            return Err(LoggerError::config(
                "display palette must contain at least one color",
            ));
        }

        Ok(())
    }
}
