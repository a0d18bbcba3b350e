//! # Axis Transform
//!
//! Converts a filtered 12-bit reading into a signed, dead-zoned axis value.
//!
//! ## Steps
//!
//! 1. Clamp to the converter range (0-4095)
//! 2. Subtract the midpoint (2048) so center reads 0
//! 3. Divide by the scale factor (truncating towards zero)
//! 4. Force `|value| < DEAD_ZONE_THRESHOLD` to exactly 0
//!
//! Output range is -256..=255.
//!
//! ## Usage
//!
//! ```
//! use joystick_bridge::signal::scale;
//!
//! assert_eq!(scale(2048), 0);     // center
//! assert_eq!(scale(2100), 0);     // (52 / 8) = 6, inside the dead zone
//! assert_eq!(scale(3000), 119);   // (952 / 8)
//! assert_eq!(scale(0), -256);
//! ```

/// Largest value a 12-bit converter returns.
pub const ADC_MAX: i32 = 4095;

/// Half of the 12-bit full-scale range.
pub const ADC_MIDPOINT: i32 = 2048;

/// Divisor applied to the centered reading.
pub const SCALE_FACTOR: i32 = 8;

/// Scaled magnitudes strictly below this are forced to zero.
pub const DEAD_ZONE_THRESHOLD: i32 = 8;

/// Centers, scales and dead-zones a filtered reading.
///
/// # Arguments
///
/// * `filtered` - Output of the moving average filter (nominally 0-4095)
///
/// # Returns
///
/// Signed axis value, 0 within the dead zone
#[must_use]
pub fn scale(filtered: i32) -> i16 {
    let scaled = center_and_divide(filtered);

    if in_dead_zone(scaled) {
        0
    } else {
        // Clamped input keeps this in -256..=255.
        scaled as i16
    }
}

/// Centered-and-divided value before the dead zone is applied.
#[inline]
#[must_use]
pub fn center_and_divide(filtered: i32) -> i32 {
    (filtered.clamp(0, ADC_MAX) - ADC_MIDPOINT) / SCALE_FACTOR
}

/// Symmetric magnitude test around zero.
#[inline]
fn in_dead_zone(scaled: i32) -> bool {
    scaled.abs() < DEAD_ZONE_THRESHOLD
}
