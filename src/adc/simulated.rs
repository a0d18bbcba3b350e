//! # Simulated ADC
//!
//! Stand-in converter for running the bridge on a host without joystick hardware.
//!
//! GPIO 26-29 carry the converter's four analog inputs (0-3). Every input
//! produces its own triangle wave over 0-4095, advancing by `sweep_step` per
//! conversion. Input `n` starts a quarter period after input `n - 1`, so the
//! axes move independently.

use tracing::debug;

use super::{input_for_pin, AdcPeripheral, ChannelHandle, ADC_INPUTS};
use crate::error::{BridgeError, Result};

/// Largest conversion result.
pub const ADC_FULL_SCALE: u16 = 4095;

/// Deterministic triangle-wave converter.
#[derive(Debug, Clone)]
pub struct SimulatedAdc {
    /// Sweep increment per conversion
    step: u16,
    /// Position within one period (0..2 * full scale) per input
    phase: [u32; ADC_INPUTS],
    /// Inputs configured through `init_channel`
    initialized: [bool; ADC_INPUTS],
    /// Input routed to the converter
    selected: Option<usize>,
}

impl SimulatedAdc {
    /// Creates a converter sweeping by `step` counts per conversion.
    ///
    /// A `step` of 0 is treated as 1.
    #[must_use]
    pub fn new(step: u16) -> Self {
        let period = Self::period();
        let mut phase = [0u32; ADC_INPUTS];
        for (i, p) in phase.iter_mut().enumerate() {
            *p = (period / ADC_INPUTS as u32) * i as u32;
        }

        Self {
            step: step.max(1),
            phase,
            initialized: [false; ADC_INPUTS],
            selected: None,
        }
    }

    fn period() -> u32 {
        2 * ADC_FULL_SCALE as u32
    }

    fn triangle(phase: u32) -> u16 {
        let full = ADC_FULL_SCALE as u32;
        if phase <= full {
            phase as u16
        } else {
            (2 * full - phase) as u16
        }
    }
}

impl AdcPeripheral for SimulatedAdc {
    fn init_channel(&mut self, pin: u8) -> Result<ChannelHandle> {
        let input = input_for_pin(pin)?;
        self.initialized[input as usize] = true;
        debug!("Simulated ADC: GPIO {} -> input {}", pin, input);
        Ok(ChannelHandle { input })
    }

    fn select_channel(&mut self, handle: ChannelHandle) -> Result<()> {
        let input = handle.input as usize;
        if input >= ADC_INPUTS || !self.initialized[input] {
            return Err(BridgeError::Adc(format!(
                "ADC input {} selected before initialization",
                handle.input
            )));
        }
        self.selected = Some(input);
        Ok(())
    }

    fn read_raw(&mut self) -> Result<u16> {
        let input = self
            .selected
            .ok_or_else(|| BridgeError::Adc("No ADC input selected".to_string()))?;

        let value = Self::triangle(self.phase[input]);
        self.phase[input] = (self.phase[input] + self.step as u32) % Self::period();
        Ok(value)
    }
}
