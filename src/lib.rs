//! # Joystick Bridge Library
//!
//! Samples a two-axis analog joystick and streams the filtered positions to a
//! receiver over a serial line.
//!
//! Each axis is smoothed with a 5-sample moving average, centered and scaled
//! around a dead zone, and sent as a 4-byte packet
//! `[axis, value_low, value_high, 0xFF]`.

pub mod adc;
pub mod config;
pub mod error;
pub mod logging;
pub mod packet;
pub mod queue;
pub mod sample;
pub mod serial;
pub mod signal;
pub mod tasks;
pub mod telemetry;
