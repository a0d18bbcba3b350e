//! # Axis Sampler Task
//!
//! Reads one joystick axis every [`SAMPLE_PERIOD`], smooths and scales the
//! reading, and pushes the result onto the sample queue.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::adc::{AdcPeripheral, ChannelHandle, SharedAdc};
use crate::error::Result;
use crate::queue::SampleSender;
use crate::sample::{AdcSample, AxisId};
use crate::signal::{scale, MovingAverageFilter};

/// Pause between two readings of the same axis.
pub const SAMPLE_PERIOD: Duration = Duration::from_millis(100);

/// Sampler for a single axis.
///
/// Owns the axis' filter; nothing else reads or writes it.
#[derive(Debug)]
pub struct AxisSampler<A> {
    axis: AxisId,
    channel: ChannelHandle,
    adc: SharedAdc<A>,
    filter: MovingAverageFilter,
    queue: SampleSender,
}

impl<A: AdcPeripheral> AxisSampler<A> {
    /// Configure the ADC input on `pin` and start with a zeroed filter.
    ///
    /// # Errors
    ///
    /// Returns error if the peripheral rejects the pin
    pub async fn init(
        axis: AxisId,
        pin: u8,
        adc: SharedAdc<A>,
        queue: SampleSender,
    ) -> Result<Self> {
        let channel = adc.init_channel(pin).await?;
        info!("Axis {} sampler on GPIO {} (ADC input {})", axis, pin, channel.input);

        Ok(Self {
            axis,
            channel,
            adc,
            filter: MovingAverageFilter::new(),
            queue,
        })
    }

    /// Read, filter and scale one value.
    ///
    /// # Errors
    ///
    /// Returns error if the ADC read fails; the filter is left untouched
    pub async fn sample(&mut self) -> Result<AdcSample> {
        let raw = self.adc.read(self.channel).await?;
        let filtered = self.filter.push(i32::from(raw));
        let value = scale(filtered);

        Ok(AdcSample::new(self.axis, value))
    }

    /// Sample forever.
    ///
    /// A failed read skips that period. A full queue holds the sampler until
    /// the writer frees a slot. Returns only when the queue's receiver is gone.
    pub async fn run(mut self) -> Result<()> {
        loop {
            match self.sample().await {
                Ok(sample) => {
                    debug!("Axis {} value: {}", sample.axis, sample.value);
                    if self.queue.free_slots() == 0 {
                        warn!("Sample queue full, axis {} waiting for the writer", self.axis);
                    }
                    self.queue.send(sample).await?;
                }
                Err(e) => {
                    warn!("Axis {} read failed: {}", self.axis, e);
                }
            }

            tokio::time::sleep(SAMPLE_PERIOD).await;
        }
    }

    /// Axis this sampler reads.
    pub fn axis(&self) -> AxisId {
        self.axis
    }
}
