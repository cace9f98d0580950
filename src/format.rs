//! Display line formatting.
//!
//! One line per event: node id, sensor model, a fixed-width status label so
//! the timestamp column lines up across statuses, and a telemetry suffix for
//! ranging radars that reported one.

use chrono::NaiveDateTime;

use crate::decode::{SensorRecord, Status};
use crate::palette::{Color, STYLE_RESET};

/// Width of the status label column, sized to "Presence Detected".
pub const STATUS_LABEL_WIDTH: usize = 17;

/// Width of the sensor model column.
pub const SENSOR_WIDTH: usize = 9;

/// Timestamp layout for the trailing time column.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Sensor models that report range and speed with a detection. Simple
// presence radars (RCWL-0516 class) send status only and get no suffix.
const RANGING_SENSORS: &[&str] = &["C4001"];

fn reports_ranging(sensor_type: &str) -> bool {
    RANGING_SENSORS.contains(&sensor_type)
}

/// Render one decoded record as a color-coded console line.
///
/// Numeric formatting is locale-invariant: range to one decimal place,
/// speed to two. When telemetry is absent the suffix is omitted entirely
/// rather than filled with placeholders.
pub fn format_line(record: &SensorRecord, color: Color, timestamp: NaiveDateTime) -> String {
    let sensor = record.sensor_type.as_deref().unwrap_or("Unknown");

    let label = match &record.status {
        Status::MotionDetected => "Presence Detected".to_string(),
        Status::NoMotion => "No Presence".to_string(),
        Status::Other(raw) => format!("Unknown Status ({raw})"),
    };

    let mut line = format!(
        "{}NODE ARRAY ID: {} | SENSOR: {sensor:<sw$} | {label:<lw$}",
        color.ansi(),
        record.node_id,
        sw = SENSOR_WIDTH,
        lw = STATUS_LABEL_WIDTH,
    );

    if record.status == Status::MotionDetected && reports_ranging(sensor) {
        if let (Some(range), Some(speed)) = (record.range_cm, record.speed_mps) {
            if let Some(target) = record.target_number {
                line.push_str(&format!(" | Target: {target}"));
            }
            line.push_str(&format!(" | Range: {range:.1} cm | Speed: {speed:.2} m/s"));
        }
    }

    line.push_str(&format!(
        " | Time: {}{}",
        timestamp.format(TIMESTAMP_FORMAT),
        STYLE_RESET
    ));
    line
}
