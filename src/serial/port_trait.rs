//! Trait abstraction for the serial line to enable testing

use async_trait::async_trait;
use std::io;

/// Byte-level serial transmit
#[async_trait]
pub trait SerialLine: Send {
    /// Transmit a single byte
    async fn write_byte(&mut self, byte: u8) -> io::Result<()>;

    /// Flush the output buffer
    async fn flush(&mut self) -> io::Result<()>;
}
