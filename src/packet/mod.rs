//! # Packet Module
//!
//! The 4-byte wire record sent for every sample.
//!
//! This module handles:
//! - Packet layout constants
//! - Encoding an `AdcSample` into a packet
//! - Decoding a packet on the receiving side

pub mod protocol;
pub mod encoder;
pub mod decoder;
