//! # Packet Layout
//!
//! ```text
//! +--------+-----------+------------+------------+
//! | axis   | value low | value high | terminator |
//! | 0 / 1  | bits 0-7  | bits 8-15  | 0xFF       |
//! +--------+-----------+------------+------------+
//! ```
//!
//! The value is the sample's `i16` in two's complement, little-endian. There is
//! no checksum and no escaping. Any negative value has a high byte of `0xFF`,
//! the same as the terminator, so a receiver that loses sync cannot tell a
//! terminator from a value byte by content alone.

/// Total packet length in bytes
pub const PACKET_LEN: usize = 4;

/// Byte closing every packet
pub const PACKET_TERMINATOR: u8 = 0xFF;

/// Offset of the axis byte
pub const AXIS_OFFSET: usize = 0;

/// Offset of the value's low byte
pub const VALUE_LOW_OFFSET: usize = 1;

/// Offset of the value's high byte
pub const VALUE_HIGH_OFFSET: usize = 2;

/// Offset of the terminator
pub const TERMINATOR_OFFSET: usize = 3;

/// One encoded sample
pub type Packet = [u8; PACKET_LEN];
