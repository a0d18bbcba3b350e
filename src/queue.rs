//! # Sample Queue
//!
//! Bounded FIFO handing samples from the two axis samplers to the packet writer.
//!
//! Both sides wait instead of failing: `send` waits while the queue holds
//! [`QUEUE_CAPACITY`] samples (a slow writer stalls the samplers, nothing is
//! dropped), `receive` waits while it is empty. Synchronization is provided by
//! the underlying bounded `tokio::sync::mpsc` channel.
//!
//! ## Usage
//!
//! ```
//! use joystick_bridge::queue::SampleQueue;
//! use joystick_bridge::sample::{AdcSample, AxisId};
//!
//! # tokio_test::block_on(async {
//! let (tx, mut rx) = SampleQueue::new();
//! tx.send(AdcSample::new(AxisId::X, 12)).await.unwrap();
//! assert_eq!(rx.receive().await, Some(AdcSample::new(AxisId::X, 12)));
//! # });
//! ```

use tokio::sync::mpsc;

use crate::error::{BridgeError, Result};
use crate::sample::AdcSample;

/// Maximum number of samples waiting for the writer.
pub const QUEUE_CAPACITY: usize = 32;

/// Constructor for the sender/receiver pair.
#[derive(Debug)]
pub struct SampleQueue;

impl SampleQueue {
    /// Creates a queue with capacity [`QUEUE_CAPACITY`].
    ///
    /// Clone the sender once per producer.
    #[allow(clippy::new_ret_no_self)]
    #[must_use]
    pub fn new() -> (SampleSender, SampleReceiver) {
        let (tx, rx) = mpsc::channel(QUEUE_CAPACITY);
        (SampleSender { tx }, SampleReceiver { rx })
    }
}

/// Producer handle.
#[derive(Debug, Clone)]
pub struct SampleSender {
    tx: mpsc::Sender<AdcSample>,
}

impl SampleSender {
    /// Enqueues a sample, waiting while the queue is full.
    ///
    /// # Errors
    ///
    /// Returns `BridgeError::QueueClosed` if the receiver has been dropped
    pub async fn send(&self, sample: AdcSample) -> Result<()> {
        self.tx.send(sample).await.map_err(|_| BridgeError::QueueClosed)
    }

    /// Number of samples that can be sent before `send` starts waiting.
    #[must_use]
    pub fn free_slots(&self) -> usize {
        self.tx.capacity()
    }
}

/// Consumer handle.
#[derive(Debug)]
pub struct SampleReceiver {
    rx: mpsc::Receiver<AdcSample>,
}

impl SampleReceiver {
    /// Dequeues the oldest sample, waiting while the queue is empty.
    ///
    /// Returns `None` only after every sender has been dropped and the
    /// remaining samples have been drained.
    pub async fn receive(&mut self) -> Option<AdcSample> {
        self.rx.recv().await
    }
}
