//! # Serial Communication Module
//!
//! Handles the UART link to the receiver.
//!
//! This module handles:
//! - Opening the configured serial port (8N1, no flow control)
//! - Byte-level async writes used by the packet writer

pub mod port_trait;

use async_trait::async_trait;
use std::io;
use tokio::io::AsyncWriteExt;
use tokio_serial::SerialPortBuilderExt;
use tracing::info;

use crate::config::SerialConfig;
use crate::error::{BridgeError, Result};

pub use port_trait::SerialLine;

/// UART connection to the receiver
pub struct UartSerial {
    /// Serial port handle
    port: tokio_serial::SerialStream,
    /// Device path (e.g., /dev/ttyACM0)
    device_path: String,
}

impl std::fmt::Debug for UartSerial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UartSerial")
            .field("device_path", &self.device_path)
            .finish_non_exhaustive()
    }
}

impl UartSerial {
    /// Open the serial port described by `config`
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Serial` if the port cannot be opened
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use joystick_bridge::config::SerialConfig;
    /// use joystick_bridge::serial::UartSerial;
    ///
    /// #[tokio::main]
    /// async fn main() -> anyhow::Result<()> {
    ///     let config = SerialConfig { port: "/dev/ttyUSB0".to_string(), baud_rate: 115200 };
    ///     let serial = UartSerial::open(&config)?;
    ///     println!("Connected to: {}", serial.device_path());
    ///     Ok(())
    /// }
    /// ```
    pub fn open(config: &SerialConfig) -> Result<Self> {
        let port = Self::open_port(&config.port, config.baud_rate)?;
        info!("Opened serial port {} at {} baud", config.port, config.baud_rate);

        Ok(Self {
            port,
            device_path: config.port.clone(),
        })
    }

    /// Open a specific serial port with 8N1 settings
    fn open_port(path: &str, baud_rate: u32) -> Result<tokio_serial::SerialStream> {
        tokio_serial::new(path, baud_rate)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| BridgeError::Serial(format!("Failed to open {}: {}", path, e)))
    }

    /// Get the device path of the opened serial port
    pub fn device_path(&self) -> &str {
        &self.device_path
    }
}

#[async_trait]
impl SerialLine for UartSerial {
    async fn write_byte(&mut self, byte: u8) -> io::Result<()> {
        self.port.write_u8(byte).await
    }

    async fn flush(&mut self) -> io::Result<()> {
        self.port.flush().await
    }
}
