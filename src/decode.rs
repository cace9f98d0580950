//! Payload decoding for presence telemetry messages.
//!
//! The publisher schema evolved from status-only messages to detailed motion
//! telemetry with a sensor model field. All variants decode into a single
//! [`SensorRecord`] with optional fields; the formatter branches on field
//! presence rather than on a schema version.

use serde_json::Value;

use crate::error::DecodeError;

/// Presence status reported by a sensor node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    MotionDetected,
    NoMotion,
    /// Any status value this logger does not recognize, kept verbatim.
    Other(String),
}

impl Status {
    fn from_wire(raw: &str) -> Self {
        match raw {
            "motion_detected" => Self::MotionDetected,
            "no_motion" => Self::NoMotion,
            other => Self::Other(other.to_string()),
        }
    }
}

/// One decoded telemetry message. Built fresh per message, immutable after.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorRecord {
    /// Reporting node, 1-based by convention.
    pub node_id: i64,
    /// Presence status.
    pub status: Status,
    /// Sensor model name (e.g. "C4001"), if the node reports one.
    pub sensor_type: Option<String>,
    /// Detected target number.
    pub target_number: Option<i64>,
    /// Target range in centimeters.
    pub range_cm: Option<f64>,
    /// Target speed in meters per second.
    pub speed_mps: Option<f64>,
}

/// Decode a raw MQTT payload into a [`SensorRecord`].
///
/// Field names follow the publisher contract exactly: `nodeId`, `status`,
/// `sensorType`, `targetNumber`, `range_cm`, `speed_m_s`. The two required
/// fields fail the message when absent or mistyped; optional fields with the
/// wrong type are treated as absent so a misbehaving node cannot crash the
/// formatter.
pub fn decode(payload: &[u8]) -> Result<SensorRecord, DecodeError> {
    let text = std::str::from_utf8(payload).map_err(|_| DecodeError::InvalidEncoding)?;

    let value: Value = serde_json::from_str(text)
        .map_err(|err| DecodeError::InvalidStructure(err.to_string()))?;
    let object = value
        .as_object()
        .ok_or_else(|| DecodeError::InvalidStructure("not a JSON object".to_string()))?;

    let node_id = object
        .get("nodeId")
        .and_then(Value::as_i64)
        .ok_or(DecodeError::MissingRequiredField { field: "nodeId" })?;

    let status = object
        .get("status")
        .and_then(Value::as_str)
        .map(Status::from_wire)
        .ok_or(DecodeError::MissingRequiredField { field: "status" })?;

    Ok(SensorRecord {
        node_id,
        status,
        sensor_type: object
            .get("sensorType")
            .and_then(Value::as_str)
            .map(str::to_string),
        target_number: object.get("targetNumber").and_then(Value::as_i64),
        range_cm: object.get("range_cm").and_then(Value::as_f64),
        speed_mps: object.get("speed_m_s").and_then(Value::as_f64),
    })
}
