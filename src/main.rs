//! # Joystick Bridge
//!
//! Samples a two-axis analog joystick and streams filtered positions to a
//! receiver over a serial line.

use anyhow::{Context, Result};
use tracing::{error, info};

use joystick_bridge::adc::{SharedAdc, SimulatedAdc};
use joystick_bridge::config::Config;
use joystick_bridge::logging;
use joystick_bridge::serial::UartSerial;
use joystick_bridge::tasks::{self, AxisPins, SAMPLE_PERIOD};
use joystick_bridge::telemetry::PacketLog;

/// Configuration file used when no path is given on the command line
const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Main entry point for Joystick Bridge
///
/// # Control Flow
///
/// 1. Load configuration (first argument, or `config/default.toml`)
/// 2. Set up logging
/// 3. Open the serial port and the ADC
/// 4. Spawn the X and Y samplers and the packet writer
/// 5. Run until Ctrl+C or until a task exits
///
/// # Errors
///
/// Returns error if:
/// - The configuration cannot be loaded or is invalid
/// - The serial port cannot be opened
/// - An ADC input cannot be initialized
#[tokio::main]
async fn main() -> Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load configuration from {}", config_path))?;

    let _log_guard = logging::init(&config.logging);

    info!("Joystick Bridge v{} starting...", env!("CARGO_PKG_VERSION"));

    let serial = UartSerial::open(&config.serial)?;
    info!("Serial port opened at: {}", serial.device_path());

    let packet_log = if config.telemetry.enabled {
        Some(PacketLog::new(&config.telemetry)?)
    } else {
        None
    };

    let adc = SharedAdc::new(SimulatedAdc::new(config.adc.sweep_step));
    let pins = AxisPins {
        x: config.adc.x_pin,
        y: config.adc.y_pin,
    };

    let mut pipeline = tasks::start(adc, pins, serial, packet_log).await?;
    info!(
        "Sampling both axes every {} ms",
        SAMPLE_PERIOD.as_millis()
    );
    info!("Press Ctrl+C to exit");

    tokio::select! {
        result = &mut pipeline.x_sampler => report_exit("X sampler", result),
        result = &mut pipeline.y_sampler => report_exit("Y sampler", result),
        result = &mut pipeline.writer => report_exit("Packet writer", result),
        _ = tokio::signal::ctrl_c() => {
            info!("Received Ctrl+C, shutting down...");
        }
    }

    pipeline.abort();
    Ok(())
}

/// Log why a task that should run forever has stopped
fn report_exit(
    name: &str,
    result: std::result::Result<joystick_bridge::error::Result<()>, tokio::task::JoinError>,
) {
    match result {
        Ok(Ok(())) => info!("{} finished", name),
        Ok(Err(e)) => error!("{} stopped: {}", name, e),
        Err(e) => error!("{} panicked: {}", name, e),
    }
}
