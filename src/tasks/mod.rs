//! # Tasks Module
//!
//! The producer/consumer topology: two axis samplers feeding one packet writer
//! through a single bounded [`SampleQueue`](crate::queue::SampleQueue).
//!
//! ```text
//!  AxisSampler(X) ──┐
//!                   ├──> SampleQueue (32) ──> PacketWriter ──> serial line
//!  AxisSampler(Y) ──┘
//! ```

pub mod sampler;
pub mod writer;

use tokio::task::JoinHandle;
use tracing::info;

use crate::adc::{AdcPeripheral, SharedAdc};
use crate::error::Result;
use crate::queue::SampleQueue;
use crate::sample::AxisId;
use crate::serial::SerialLine;
use crate::telemetry::PacketLog;

pub use sampler::{AxisSampler, SAMPLE_PERIOD};
pub use writer::PacketWriter;

/// GPIO assignment for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisPins {
    pub x: u8,
    pub y: u8,
}

/// Handles to the three running tasks.
#[derive(Debug)]
pub struct Pipeline {
    pub x_sampler: JoinHandle<Result<()>>,
    pub y_sampler: JoinHandle<Result<()>>,
    pub writer: JoinHandle<Result<()>>,
}

impl Pipeline {
    /// Stop all tasks.
    pub fn abort(&self) {
        self.x_sampler.abort();
        self.y_sampler.abort();
        self.writer.abort();
    }
}

/// Create the queue, initialize both samplers and spawn all three tasks.
///
/// # Errors
///
/// Returns error if either ADC input cannot be initialized; nothing is
/// spawned in that case
pub async fn start<A, S>(
    adc: SharedAdc<A>,
    pins: AxisPins,
    serial: S,
    packet_log: Option<PacketLog>,
) -> Result<Pipeline>
where
    A: AdcPeripheral + 'static,
    S: SerialLine + 'static,
{
    let (tx, rx) = SampleQueue::new();

    let x = AxisSampler::init(AxisId::X, pins.x, adc.clone(), tx.clone()).await?;
    let y = AxisSampler::init(AxisId::Y, pins.y, adc, tx).await?;
    info!("Spawning {} and {} samplers and the packet writer", x.axis(), y.axis());

    let mut writer = PacketWriter::new(serial, rx);
    if let Some(log) = packet_log {
        writer = writer.with_packet_log(log);
    }

    Ok(Pipeline {
        x_sampler: tokio::spawn(x.run()),
        y_sampler: tokio::spawn(y.run()),
        writer: tokio::spawn(writer.run()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adc::{ChannelHandle, MockAdcPeripheral, SimulatedAdc};
    use crate::error::BridgeError;
    use crate::packet::decoder::decode_stream;
    use crate::sample::AdcSample;
    use crate::serial::port_trait::mocks::MockSerialLine;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Mock ADC with a constant reading per input (input 0 = X, input 1 = Y).
    fn constant_adc(x: u16, y: u16) -> MockAdcPeripheral {
        let selected = Arc::new(Mutex::new(0u8));
        let select = Arc::clone(&selected);

        let mut adc = MockAdcPeripheral::new();
        adc.expect_init_channel().returning(|pin| {
            let input = if pin == 28 { 0 } else { 1 };
            Ok(ChannelHandle { input })
        });
        adc.expect_select_channel().returning(move |h| {
            *select.lock().unwrap() = h.input;
            Ok(())
        });
        adc.expect_read_raw().returning(move || {
            Ok(if *selected.lock().unwrap() == 0 { x } else { y })
        });
        adc
    }

    fn pins() -> AxisPins {
        AxisPins { x: 28, y: 27 }
    }

    async fn collect_packets(serial: &MockSerialLine, count: usize) -> Vec<AdcSample> {
        loop {
            let bytes = serial.get_written_bytes();
            if bytes.len() >= count * 4 {
                return decode_stream(&bytes[..count * 4]).unwrap();
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_centered_x_produces_zero_packet() {
        let serial = MockSerialLine::new();
        let pipeline = start(SharedAdc::new(constant_adc(2048, 2048)), pins(), serial.clone(), None)
            .await
            .unwrap();

        let samples = collect_packets(&serial, 10).await;
        pipeline.abort();

        let x: Vec<_> = samples.iter().filter(|s| s.axis == AxisId::X).collect();
        assert_eq!(x.len(), 5);
        // Fifth reading fills the window: filtered 2048 -> 0
        assert_eq!(*x[4], AdcSample::new(AxisId::X, 0));

        let bytes = serial.get_written_bytes();
        let x_packets: Vec<&[u8]> = bytes.chunks(4).filter(|p| p[0] == 0x00).collect();
        assert_eq!(x_packets[4], &[0x00, 0x00, 0x00, 0xFF]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deflected_y_produces_nonzero_packet() {
        let serial = MockSerialLine::new();
        let pipeline = start(SharedAdc::new(constant_adc(2048, 3000)), pins(), serial.clone(), None)
            .await
            .unwrap();

        let samples = collect_packets(&serial, 10).await;
        pipeline.abort();

        let y: Vec<_> = samples.iter().filter(|s| s.axis == AxisId::Y).collect();
        assert_eq!(y.len(), 5);
        assert_eq!(y[4].value, 119);

        let bytes = serial.get_written_bytes();
        let y_packets: Vec<&[u8]> = bytes.chunks(4).filter(|p| p[0] == 0x01).collect();
        assert_eq!(y_packets[4], &[0x01, 119, 0x00, 0xFF]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_axes_interleave_but_keep_own_order() {
        let serial = MockSerialLine::new();
        let adc = SharedAdc::new(SimulatedAdc::new(256));
        let pipeline = start(adc, pins(), serial.clone(), None).await.unwrap();

        let samples = collect_packets(&serial, 20).await;
        pipeline.abort();

        let x = samples.iter().filter(|s| s.axis == AxisId::X).count();
        let y = samples.iter().filter(|s| s.axis == AxisId::Y).count();
        assert_eq!(x + y, 20);
        assert!(x.abs_diff(y) <= 1, "x = {}, y = {}", x, y);
    }

    #[tokio::test]
    async fn test_start_fails_on_bad_pin() {
        let adc = SharedAdc::new(SimulatedAdc::new(64));
        let result = start(adc, AxisPins { x: 28, y: 12 }, MockSerialLine::new(), None).await;
        assert!(matches!(result, Err(BridgeError::Adc(_))));
    }
}
