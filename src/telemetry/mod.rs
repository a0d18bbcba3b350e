//! # Telemetry Module
//!
//! Optional record of every transmitted packet as JSONL files with rotation.
//!
//! This module handles:
//! - Formatting one JSON line per packet
//! - Starting a new file after N records
//! - Retaining only the last M files

pub mod packet_log;

pub use packet_log::PacketLog;
