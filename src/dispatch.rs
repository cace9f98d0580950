//! Event dispatch: the glue between the MQTT transport and the core.
//!
//! The transport invokes [`EventDispatcher::on_connected`] and
//! [`EventDispatcher::on_message`]; everything downstream of those calls is
//! synchronous and pure, so tests drive the dispatcher without a broker.

use std::io::Write;

use chrono::Local;

use crate::config::LoggerConfig;
use crate::decode;
use crate::error::DecodeError;
use crate::format;
use crate::palette::{self, Color, STYLE_RESET};

/// What the transport should do after a connection acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectDecision {
    /// Connection accepted: subscribe to the given topic.
    Subscribe(String),
    /// Connection refused by the broker: do not subscribe.
    Reject,
}

/// Dispatches connection and message events to the decode/format pipeline.
///
/// Generic over the output sink so tests can capture lines in a `Vec<u8>`
/// instead of stdout. Per-message failures are reported as console warnings
/// and skipped; nothing at this layer terminates the process.
pub struct EventDispatcher<W> {
    broker: String,
    topic: String,
    palette: Vec<Color>,
    out: W,
}

impl<W: Write> EventDispatcher<W> {
    pub fn new(config: &LoggerConfig, out: W) -> Self {
        Self {
            broker: format!("{}:{}", config.mqtt.host, config.mqtt.port),
            topic: config.mqtt.topic.clone(),
            palette: config.display.palette.clone(),
            out,
        }
    }

    /// Handle a broker connection acknowledgement.
    ///
    /// Return code 0 confirms the connection and asks the transport to
    /// subscribe. Any other code is diagnosed and refused; code 5 usually
    /// means the broker rejected anonymous clients.
    pub fn on_connected(&mut self, code: u8) -> ConnectDecision {
        if code == 0 {
            self.emit(
                Color::Cyan,
                &format!("---> Successfully connected to MQTT Broker at {}", self.broker),
            );
            self.emit(
                Color::Cyan,
                &format!(
                    "---> Subscribed to topic '{}'. Waiting for messages...",
                    self.topic
                ),
            );
            ConnectDecision::Subscribe(self.topic.clone())
        } else {
            self.emit(
                Color::Red,
                &format!("---> Failed to connect, return code {code}"),
            );
            if code == 5 {
                self.emit(
                    Color::Red,
                    "---> Connection refused: check broker config for 'allow_anonymous true'.",
                );
            }
            ConnectDecision::Reject
        }
    }

    /// Handle one raw payload from the subscribed topic.
    ///
    /// The arrival timestamp is assigned here; the payload is never trusted
    /// to carry one.
    pub fn on_message(&mut self, payload: &[u8]) {
        let arrived = Local::now().naive_local();

        match decode::decode(payload) {
            Ok(record) => {
                let color = palette::color_for(record.node_id, &self.palette);
                let line = format::format_line(&record, color, arrived);
                self.write_line(&line);
            }
            Err(DecodeError::MissingRequiredField { field }) => {
                tracing::warn!(field, "message missing required field");
                self.emit(
                    Color::Yellow,
                    &format!(
                        "[WARNING] Malformed message received: {}",
                        String::from_utf8_lossy(payload)
                    ),
                );
            }
            Err(err) => {
                tracing::warn!(%err, "undecodable payload");
                self.emit(
                    Color::Yellow,
                    &format!(
                        "[WARNING] Could not decode JSON from payload: {}",
                        String::from_utf8_lossy(payload)
                    ),
                );
            }
        }
    }

    fn emit(&mut self, color: Color, text: &str) {
        let line = format!("{}{text}{STYLE_RESET}", color.ansi());
        self.write_line(&line);
    }

    fn write_line(&mut self, line: &str) {
        // A failed write is logged and skipped; the next message still runs.
        if let Err(err) = writeln!(self.out, "{line}") {
            tracing::error!(%err, "failed to write output line");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DisplayConfig, LoggingConfig, MqttConfig};

    fn test_config() -> LoggerConfig {
        LoggerConfig {
            mqtt: MqttConfig {
                host: "broker.local".to_string(),
                port: 1883,
                client_id: "test-logger".to_string(),
                topic: "sensors/radar/status".to_string(),
                keep_alive_secs: 60,
            },
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    fn dispatcher() -> EventDispatcher<Vec<u8>> {
        EventDispatcher::new(&test_config(), Vec::new())
    }

    fn output(dispatcher: &EventDispatcher<Vec<u8>>) -> String {
        String::from_utf8(dispatcher.out.clone()).unwrap()
    }

    #[test]
    fn test_connect_success_subscribes() {
        let mut dispatcher = dispatcher();

        let decision = dispatcher.on_connected(0);
        assert_eq!(
            decision,
            ConnectDecision::Subscribe("sensors/radar/status".to_string())
        );

        let out = output(&dispatcher);
        assert!(out.contains("Successfully connected to MQTT Broker at broker.local:1883"));
        assert!(out.contains("Subscribed to topic 'sensors/radar/status'"));
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_connect_refused_code_5() {
        let mut dispatcher = dispatcher();

        let decision = dispatcher.on_connected(5);
        assert_eq!(decision, ConnectDecision::Reject);

        let out = output(&dispatcher);
        assert!(out.contains("Failed to connect, return code 5"));
        assert!(out.contains("allow_anonymous true"));
    }

    #[test]
    fn test_connect_refused_other_code() {
        let mut dispatcher = dispatcher();

        assert_eq!(dispatcher.on_connected(3), ConnectDecision::Reject);

        let out = output(&dispatcher);
        assert!(out.contains("return code 3"));
        assert!(!out.contains("allow_anonymous"));
    }

    #[test]
    fn test_message_produces_one_line() {
        let mut dispatcher = dispatcher();

        dispatcher.on_message(
            br#"{"nodeId":1,"status":"motion_detected","sensorType":"C4001","targetNumber":1,"range_cm":250.0,"speed_m_s":0.5}"#,
        );

        let out = output(&dispatcher);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("NODE ARRAY ID: 1"));
        assert!(out.contains("Presence Detected"));
        assert!(out.contains("Target: 1"));
        assert!(out.contains("250.0 cm"));
        assert!(out.contains("0.50 m/s"));
        // Arrival timestamp in YYYY-MM-DD HH:MM:SS form.
        let time = out.split("Time: ").nth(1).unwrap();
        assert_eq!(time.as_bytes()[4], b'-');
        assert_eq!(time.as_bytes()[13], b':');
    }

    #[test]
    fn test_malformed_json_warns_and_continues() {
        let mut dispatcher = dispatcher();

        dispatcher.on_message(b"{not json");
        dispatcher.on_message(br#"{"nodeId":2,"status":"no_motion"}"#);

        let out = output(&dispatcher);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[WARNING] Could not decode JSON from payload: {not json"));
        assert!(lines[1].contains("NODE ARRAY ID: 2"));
        assert!(lines[1].contains("No Presence"));
    }

    #[test]
    fn test_missing_field_warns_distinctly() {
        let mut dispatcher = dispatcher();

        dispatcher.on_message(br#"{"status":"no_motion"}"#);

        let out = output(&dispatcher);
        assert!(out.contains("[WARNING] Malformed message received:"));
        assert!(!out.contains("Could not decode JSON"));
    }

    #[test]
    fn test_non_utf8_payload_warns() {
        let mut dispatcher = dispatcher();

        dispatcher.on_message(&[0xff, 0xfe, 0x00]);

        let out = output(&dispatcher);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("[WARNING] Could not decode JSON from payload:"));
    }

    #[test]
    fn test_lines_emitted_in_arrival_order() {
        let mut dispatcher = dispatcher();

        for id in 1..=3 {
            let payload = format!(r#"{{"nodeId":{id},"status":"no_motion"}}"#);
            dispatcher.on_message(payload.as_bytes());
        }

        let out = output(&dispatcher);
        let positions: Vec<usize> = (1..=3)
            .map(|id| out.find(&format!("NODE ARRAY ID: {id}")).unwrap())
            .collect();
        assert!(positions[0] < positions[1]);
        assert!(positions[1] < positions[2]);
    }

    #[test]
    fn test_node_colors_cycle() {
        let mut dispatcher = dispatcher();

        dispatcher.on_message(br#"{"nodeId":1,"status":"no_motion"}"#);
        dispatcher.on_message(br#"{"nodeId":6,"status":"no_motion"}"#);

        let out = output(&dispatcher);
        let lines: Vec<&str> = out.lines().collect();
        // Nodes 1 and 6 share a color with the default five-color palette.
        assert!(lines[0].starts_with(Color::Green.ansi()));
        assert!(lines[1].starts_with(Color::Green.ansi()));
    }
}
