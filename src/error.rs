//! # Error Types
//!
//! Custom error types for Joystick Bridge using `thiserror`.

use thiserror::Error;

/// Main error type for Joystick Bridge
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Malformed or unrecognized 4-byte packet
    #[error("Invalid packet: {0}")]
    InvalidPacket(String),

    /// ADC peripheral errors (unknown pin, unselected channel, failed conversion)
    #[error("ADC error: {0}")]
    Adc(String),

    /// Serial port errors
    #[error("Serial error: {0}")]
    Serial(String),

    /// The other side of the sample queue has been dropped
    #[error("Sample queue closed")]
    QueueClosed,

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Joystick Bridge
pub type Result<T> = std::result::Result<T, BridgeError>;
