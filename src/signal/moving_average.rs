//! # Moving Average Filter
//!
//! Fixed-window running mean over the most recent raw ADC readings.
//!
//! ## Warm-up
//!
//! The window starts zero-filled. Until five readings have been pushed the
//! zero slots take part in the mean, so the first four outputs are biased
//! towards zero:
//!
//! ```
//! use joystick_bridge::signal::MovingAverageFilter;
//!
//! let mut filter = MovingAverageFilter::new();
//! assert_eq!(filter.push(2000), 400);  // (2000 + 0 + 0 + 0 + 0) / 5
//! assert_eq!(filter.push(2000), 800);
//! assert_eq!(filter.push(2000), 1200);
//! assert_eq!(filter.push(2000), 1600);
//! assert_eq!(filter.push(2000), 2000); // window full
//! ```

/// Number of readings averaged by the filter.
pub const WINDOW_SIZE: usize = 5;

/// Circular-buffer moving average.
///
/// One instance per axis, owned by that axis' sampler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovingAverageFilter {
    /// The last `WINDOW_SIZE` raw readings, oldest overwritten first.
    window: [i32; WINDOW_SIZE],
    /// Slot the next reading is written to.
    cursor: usize,
}

impl Default for MovingAverageFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl MovingAverageFilter {
    /// Creates a filter with a zero-filled window.
    #[must_use]
    pub fn new() -> Self {
        Self {
            window: [0; WINDOW_SIZE],
            cursor: 0,
        }
    }

    /// Inserts a raw reading and returns the mean of the window.
    ///
    /// The mean uses truncating integer division.
    ///
    /// # Arguments
    ///
    /// * `raw` - Raw ADC reading
    ///
    /// # Returns
    ///
    /// Mean of the five slots after the insert
    pub fn push(&mut self, raw: i32) -> i32 {
        self.window[self.cursor] = raw;
        self.cursor = (self.cursor + 1) % WINDOW_SIZE;

        let sum: i32 = self.window.iter().sum();
        sum / WINDOW_SIZE as i32
    }

    /// Zeroes the window and rewinds the cursor.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Index of the slot the next reading will overwrite.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
