//! # Signal Module
//!
//! Per-axis signal conditioning between the raw ADC reading and the wire value.
//!
//! This module handles:
//! - Smoothing raw readings with a 5-sample moving average
//! - Centering and scaling the smoothed reading
//! - Forcing readings near center to zero (dead zone)

pub mod moving_average;
pub mod transform;

pub use moving_average::MovingAverageFilter;
pub use transform::scale;
