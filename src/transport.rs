//! MQTT transport collaborator.
//!
//! Owns the rumqttc client and event loop. Connection acknowledgements and
//! published payloads are forwarded to the [`EventDispatcher`]; connection
//! failures are returned to the caller instead of being retried silently.

use std::io::Write;
use std::time::Duration;

use rumqttc::{AsyncClient, ConnectReturnCode, ConnectionError, Event, MqttOptions, Packet, QoS};

use crate::config::MqttConfig;
use crate::dispatch::{ConnectDecision, EventDispatcher};
use crate::error::{LoggerError, Result};

/// Capacity of the rumqttc request channel.
const CHANNEL_CAPACITY: usize = 10;

fn return_code(code: ConnectReturnCode) -> u8 {
    match code {
        ConnectReturnCode::Success => 0,
        ConnectReturnCode::RefusedProtocolVersion => 1,
        ConnectReturnCode::BadClientId => 2,
        ConnectReturnCode::ServiceUnavailable => 3,
        ConnectReturnCode::BadUserNamePassword => 4,
        ConnectReturnCode::NotAuthorized => 5,
    }
}

/// Run the MQTT event loop, dispatching events until a fatal error.
///
/// The broker may drop and re-establish the session; every new
/// acknowledgement goes back through the dispatcher so the subscription is
/// renewed.
pub async fn run<W: Write>(
    config: &MqttConfig,
    dispatcher: &mut EventDispatcher<W>,
) -> Result<()> {
    let mut options = MqttOptions::new(&config.client_id, &config.host, config.port);
    options.set_keep_alive(Duration::from_secs(config.keep_alive_secs));

    let (client, mut eventloop) = AsyncClient::new(options, CHANNEL_CAPACITY);

    loop {
        match eventloop.poll().await {
            Ok(Event::Incoming(Packet::ConnAck(ack))) => {
                let code = return_code(ack.code);
                match dispatcher.on_connected(code) {
                    ConnectDecision::Subscribe(topic) => {
                        client
                            .subscribe(&topic, QoS::AtLeastOnce)
                            .await
                            .map_err(|err| LoggerError::Connection(err.to_string()))?;
                        tracing::debug!(topic = %topic, "subscription requested");
                    }
                    ConnectDecision::Reject => {
                        return Err(LoggerError::ConnectionRejected { code });
                    }
                }
            }
            Ok(Event::Incoming(Packet::Publish(publish))) => {
                dispatcher.on_message(&publish.payload);
            }
            Ok(_) => {}
            Err(ConnectionError::ConnectionRefused(code)) => {
                let code = return_code(code);
                dispatcher.on_connected(code);
                return Err(LoggerError::ConnectionRejected { code });
            }
            Err(err) => {
                return Err(LoggerError::Connection(err.to_string()));
            }
        }
    }
}
