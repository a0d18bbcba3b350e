//! # Packet Decoder
//!
//! Decodes 4-byte packets back into samples, as the receiver does.

use super::protocol::*;
use crate::error::{BridgeError, Result};
use crate::sample::{AdcSample, AxisId};

/// Decode a single packet
///
/// # Arguments
///
/// * `bytes` - Exactly one packet
///
/// # Returns
///
/// * `Result<AdcSample>` - Decoded sample, or error if invalid
///
/// # Errors
///
/// Returns error if:
/// - Length is not 4 bytes
/// - Terminator is not 0xFF
/// - Axis byte is neither 0 nor 1
pub fn decode_packet(bytes: &[u8]) -> Result<AdcSample> {
    if bytes.len() != PACKET_LEN {
        return Err(BridgeError::InvalidPacket(format!(
            "Expected {} bytes, got {}",
            PACKET_LEN,
            bytes.len()
        )));
    }

    if bytes[TERMINATOR_OFFSET] != PACKET_TERMINATOR {
        return Err(BridgeError::InvalidPacket(format!(
            "Invalid terminator: 0x{:02X}",
            bytes[TERMINATOR_OFFSET]
        )));
    }

    let axis = AxisId::try_from(bytes[AXIS_OFFSET])?;
    let value = i16::from_le_bytes([bytes[VALUE_LOW_OFFSET], bytes[VALUE_HIGH_OFFSET]]);

    Ok(AdcSample { axis, value })
}

/// Split a byte stream into packets at fixed 4-byte boundaries
///
/// The stream must start on a packet boundary; a trailing partial packet
/// is reported as an error. No resynchronization is attempted.
pub fn decode_stream(stream: &[u8]) -> Result<Vec<AdcSample>> {
    if stream.len() % PACKET_LEN != 0 {
        return Err(BridgeError::InvalidPacket(format!(
            "Stream length {} is not a multiple of {}",
            stream.len(),
            PACKET_LEN
        )));
    }

    stream.chunks_exact(PACKET_LEN).map(decode_packet).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packet::encoder::encode_packet;

    #[test]
    fn test_decode_recovers_every_i16() {
        for value in i16::MIN..=i16::MAX {
            let bytes = encode_packet(&AdcSample::new(AxisId::Y, value));
            let decoded = decode_packet(&bytes).unwrap();
            assert_eq!(decoded.value, value);
            assert_eq!(decoded.axis, AxisId::Y);

            // Receiver-side formula: (hi << 8) | lo
            let manual = ((bytes[2] as u16) << 8 | bytes[1] as u16) as i16;
            assert_eq!(manual, value);
        }
    }

    #[test]
    fn test_decode_wrong_length() {
        assert!(decode_packet(&[0x00, 0x00, 0xFF]).is_err());
        assert!(decode_packet(&[0x00, 0x00, 0x00, 0xFF, 0x00]).is_err());
        assert!(decode_packet(&[]).is_err());
    }

    #[test]
    fn test_decode_bad_terminator() {
        match decode_packet(&[0x00, 0x10, 0x00, 0xFE]) {
            Err(BridgeError::InvalidPacket(msg)) => assert!(msg.contains("0xFE")),
            other => panic!("Expected InvalidPacket error, got: {:?}", other),
        }
    }

    #[test]
    fn test_decode_bad_axis() {
        assert!(decode_packet(&[0x02, 0x00, 0x00, 0xFF]).is_err());
    }

    #[test]
    fn test_decode_stream() {
        let stream = [
            0x00, 0x00, 0x00, 0xFF, // X = 0
            0x01, 0x77, 0x00, 0xFF, // Y = 119
            0x00, 0xF8, 0xFF, 0xFF, // X = -8
        ];
        let samples = decode_stream(&stream).unwrap();
        assert_eq!(
            samples,
            vec![
                AdcSample::new(AxisId::X, 0),
                AdcSample::new(AxisId::Y, 119),
                AdcSample::new(AxisId::X, -8),
            ]
        );
    }

    #[test]
    fn test_decode_stream_partial_packet() {
        assert!(decode_stream(&[0x00, 0x00, 0x00, 0xFF, 0x01]).is_err());
    }

    #[test]
    fn test_terminator_scan_finds_value_byte() {
        // Known wire weakness: a receiver that frames by scanning for 0xFF
        // stops inside a negative value instead of at the real terminator.
        let mut stream = Vec::new();
        stream.extend_from_slice(&encode_packet(&AdcSample::new(AxisId::X, -1)));
        stream.extend_from_slice(&encode_packet(&AdcSample::new(AxisId::Y, 0)));

        let first_ff = stream.iter().position(|&b| b == PACKET_TERMINATOR);
        assert_eq!(first_ff, Some(VALUE_LOW_OFFSET));
        assert_ne!(first_ff, Some(TERMINATOR_OFFSET));

        // Fixed-size framing from a known boundary still decodes correctly.
        let samples = decode_stream(&stream).unwrap();
        assert_eq!(samples[0], AdcSample::new(AxisId::X, -1));
        assert_eq!(samples[1], AdcSample::new(AxisId::Y, 0));
    }
}
