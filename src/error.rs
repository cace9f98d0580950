//! Error types for the presence logger.

use thiserror::Error;

/// Result type alias using [`LoggerError`].
pub type Result<T> = std::result::Result<T, LoggerError>;

/// Fatal errors: configuration and connection problems that end the run.
#[derive(Error, Debug)]
pub enum LoggerError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Configuration file not found.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: String },

    /// Configuration parse error.
    #[error("Failed to parse configuration: {0}")]
    ConfigParse(String),

    /// Broker refused the connection.
    #[error("Broker rejected connection (return code {code})")]
    ConnectionRejected { code: u8 },

    /// MQTT connection error.
    #[error("MQTT connection error: {0}")]
    Connection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoggerError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<json5::Error> for LoggerError {
    fn from(err: json5::Error) -> Self {
        Self::ConfigParse(err.to_string())
    }
}

/// Per-message decode failures. Logged and skipped, never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// Payload bytes are not valid UTF-8.
    #[error("payload is not valid UTF-8")]
    InvalidEncoding,

    /// Payload text is not a well-formed JSON object.
    #[error("payload is not a JSON object: {0}")]
    InvalidStructure(String),

    /// A required field is absent, null, or has the wrong type.
    #[error("required field `{field}` is missing or invalid")]
    MissingRequiredField { field: &'static str },
}
