//! # Packet Writer Task
//!
//! Drains the sample queue and transmits one 4-byte packet per sample, in
//! dequeue order, one byte at a time.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{BridgeError, Result};
use crate::packet::encoder::encode_packet;
use crate::packet::protocol::Packet;
use crate::queue::SampleReceiver;
use crate::sample::AdcSample;
use crate::serial::SerialLine;
use crate::telemetry::PacketLog;

/// Number of packets between status log messages
pub const LOG_INTERVAL_PACKETS: u64 = 100;

/// Pause before retrying a byte inside a partially written packet
pub const BYTE_RETRY_DELAY: Duration = Duration::from_millis(5);

/// Consumer side of the sample queue.
pub struct PacketWriter<S> {
    serial: S,
    queue: SampleReceiver,
    packet_log: Option<PacketLog>,
    packets_sent: u64,
    packets_failed: u64,
}

impl<S: SerialLine> PacketWriter<S> {
    /// Create a writer transmitting on `serial`.
    pub fn new(serial: S, queue: SampleReceiver) -> Self {
        Self {
            serial,
            queue,
            packet_log: None,
            packets_sent: 0,
            packets_failed: 0,
        }
    }

    /// Record every transmitted packet in `log`.
    #[must_use]
    pub fn with_packet_log(mut self, log: PacketLog) -> Self {
        self.packet_log = Some(log);
        self
    }

    /// Transmit until every sampler has gone.
    ///
    /// A packet whose first byte cannot be written is dropped and the writer
    /// moves on to the next sample.
    pub async fn run(mut self) -> Result<()> {
        while let Some(sample) = self.queue.receive().await {
            if let Err(e) = self.transmit(&sample).await {
                self.packets_failed += 1;
                warn!("Dropped packet for axis {}: {}", sample.axis, e);
            }
        }

        info!(
            "Sample queue closed after {} packets ({} failed)",
            self.packets_sent, self.packets_failed
        );
        Ok(())
    }

    /// Encode `sample` and write it to the serial line.
    ///
    /// Only a failure on the axis byte drops the packet. Once that byte is
    /// out, each remaining byte is retried until it goes through so the
    /// receiver never sees a partial frame.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::Serial` if the first byte or the flush fails
    pub async fn transmit(&mut self, sample: &AdcSample) -> Result<Packet> {
        let packet = encode_packet(sample);

        self.serial
            .write_byte(packet[0])
            .await
            .map_err(|e| BridgeError::Serial(format!("Failed to write byte: {}", e)))?;

        for (offset, &byte) in packet.iter().enumerate().skip(1) {
            while let Err(e) = self.serial.write_byte(byte).await {
                warn!(
                    "Retrying byte {} of packet {:02X?}: {}",
                    offset, packet, e
                );
                tokio::time::sleep(BYTE_RETRY_DELAY).await;
            }
        }

        self.serial
            .flush()
            .await
            .map_err(|e| BridgeError::Serial(format!("Failed to flush serial port: {}", e)))?;

        self.packets_sent += 1;
        debug!("Sent packet {:02X?}", packet);

        if let Some(log) = self.packet_log.as_mut() {
            if let Err(e) = log.record(sample, &packet) {
                warn!("Packet log write failed: {}", e);
            }
        }

        if self.packets_sent % LOG_INTERVAL_PACKETS == 0 {
            info!("Sent {} packets", self.packets_sent);
        }

        Ok(packet)
    }

    /// Packets written successfully so far.
    pub fn packets_sent(&self) -> u64 {
        self.packets_sent
    }
}
