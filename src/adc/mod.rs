//! # ADC Module
//!
//! Boundary to the analog-to-digital converter.
//!
//! This module handles:
//! - The peripheral trait the samplers read through
//! - Sharing one multiplexed converter between both axis samplers
//! - A simulated converter for hosted runs

pub mod simulated;

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::error::{BridgeError, Result};

pub use simulated::SimulatedAdc;

/// First GPIO with an analog function.
pub const FIRST_ADC_PIN: u8 = 26;

/// Number of analog inputs.
pub const ADC_INPUTS: usize = 4;

/// Maps an analog-capable GPIO to its converter input.
///
/// GPIO 26-29 carry inputs 0-3; any other pin is an `Adc` error.
pub fn input_for_pin(pin: u8) -> Result<u8> {
    match pin.checked_sub(FIRST_ADC_PIN) {
        Some(input) if (input as usize) < ADC_INPUTS => Ok(input),
        _ => Err(BridgeError::Adc(format!(
            "GPIO {} has no analog function (expected {}-{})",
            pin,
            FIRST_ADC_PIN,
            FIRST_ADC_PIN + ADC_INPUTS as u8 - 1
        ))),
    }
}

/// Handle to an initialized ADC input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelHandle {
    /// Converter input index
    pub input: u8,
}

/// Multiplexed analog-to-digital converter.
///
/// One input is converted at a time: `select_channel` routes an input to the
/// converter and `read_raw` performs a single conversion on it.
#[cfg_attr(test, mockall::automock)]
pub trait AdcPeripheral: Send {
    /// Configures the GPIO `pin` for analog input.
    fn init_channel(&mut self, pin: u8) -> Result<ChannelHandle>;

    /// Routes the given input to the converter.
    fn select_channel(&mut self, handle: ChannelHandle) -> Result<()>;

    /// Performs one conversion on the selected input (0-4095).
    fn read_raw(&mut self) -> Result<u16>;
}

/// Converter shared by several samplers.
///
/// `read` holds the lock across select and convert so one sampler can never
/// read the input another sampler selected.
#[derive(Debug)]
pub struct SharedAdc<A> {
    inner: Arc<Mutex<A>>,
}

impl<A> Clone for SharedAdc<A> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<A: AdcPeripheral> SharedAdc<A> {
    /// Wraps a peripheral for sharing.
    pub fn new(adc: A) -> Self {
        Self {
            inner: Arc::new(Mutex::new(adc)),
        }
    }

    /// Configures `pin` for analog input.
    pub async fn init_channel(&self, pin: u8) -> Result<ChannelHandle> {
        self.inner.lock().await.init_channel(pin)
    }

    /// Selects `handle` and converts it.
    pub async fn read(&self, handle: ChannelHandle) -> Result<u16> {
        let mut adc = self.inner.lock().await;
        adc.select_channel(handle)?;
        adc.read_raw()
    }
}
