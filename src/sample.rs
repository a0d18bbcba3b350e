//! # Sample Types
//!
//! The value handed from the axis samplers to the packet writer.

use std::fmt;

use serde::Serialize;

use crate::error::{BridgeError, Result};

/// Joystick axis identifier.
///
/// The discriminant is the axis byte written on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[repr(u8)]
pub enum AxisId {
    /// Horizontal axis
    X = 0,
    /// Vertical axis
    Y = 1,
}

impl AxisId {
    /// Both axes, in wire order.
    pub const ALL: [AxisId; 2] = [AxisId::X, AxisId::Y];

    /// Wire byte for this axis.
    #[must_use]
    pub fn as_byte(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for AxisId {
    type Error = BridgeError;

    fn try_from(byte: u8) -> Result<Self> {
        match byte {
            0 => Ok(AxisId::X),
            1 => Ok(AxisId::Y),
            other => Err(BridgeError::InvalidPacket(format!(
                "Unknown axis byte: 0x{:02X}",
                other
            ))),
        }
    }
}

impl fmt::Display for AxisId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AxisId::X => f.write_str("X"),
            AxisId::Y => f.write_str("Y"),
        }
    }
}

/// One filtered, dead-zone adjusted reading of a single axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdcSample {
    /// Axis the reading belongs to
    pub axis: AxisId,
    /// Signed, centered value (0 inside the dead zone)
    pub value: i16,
}

impl AdcSample {
    /// Create a new sample
    #[must_use]
    pub fn new(axis: AxisId, value: i16) -> Self {
        Self { axis, value }
    }
}
