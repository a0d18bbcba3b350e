//! # Packet Encoder
//!
//! Encodes samples into 4-byte packets.

use super::protocol::*;
use crate::sample::AdcSample;

/// Encode a sample into a packet
///
/// # Arguments
///
/// * `sample` - Sample to encode
///
/// # Returns
///
/// * `Packet` - `[axis, value & 0xFF, (value >> 8) & 0xFF, 0xFF]`
///
/// # Examples
///
/// ```
/// use joystick_bridge::packet::encoder::encode_packet;
/// use joystick_bridge::sample::{AdcSample, AxisId};
///
/// let packet = encode_packet(&AdcSample::new(AxisId::Y, 119));
/// assert_eq!(packet, [0x01, 0x77, 0x00, 0xFF]);
/// ```
#[must_use]
pub fn encode_packet(sample: &AdcSample) -> Packet {
    let [low, high] = sample.value.to_le_bytes();

    let mut packet = [0u8; PACKET_LEN];
    packet[AXIS_OFFSET] = sample.axis.as_byte();
    packet[VALUE_LOW_OFFSET] = low;
    packet[VALUE_HIGH_OFFSET] = high;
    packet[TERMINATOR_OFFSET] = PACKET_TERMINATOR;
    packet
}
