//! Console logger binary for MQTT radar presence telemetry.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use mqtt_presence_logger::config::{LoggerConfig, LoggingConfig};
use mqtt_presence_logger::dispatch::EventDispatcher;
use mqtt_presence_logger::{init_tracing, transport};

/// Color-coded console logger for radar presence telemetry over MQTT.
#[derive(Parser, Debug)]
#[command(about = "MQTT presence telemetry logger")]
struct Args {
    /// Path to configuration file.
    #[arg(short, long, default_value = "presence.json5")]
    config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Configuration problems are fatal before any connection is attempted.
    let config = LoggerConfig::load_from_file(&args.config)?;

    let log_config = match args.log_level {
        Some(level) => LoggingConfig {
            level,
            ..config.logging.clone()
        },
        None => config.logging.clone(),
    };
    init_tracing(&log_config)?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        broker = %format!("{}:{}", config.mqtt.host, config.mqtt.port),
        topic = %config.mqtt.topic,
        "Starting presence logger"
    );

    let mut dispatcher = EventDispatcher::new(&config, io::stdout());

    tokio::select! {
        result = transport::run(&config.mqtt, &mut dispatcher) => {
            result.map_err(Into::into)
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutting down");
            Ok(())
        }
    }
}
