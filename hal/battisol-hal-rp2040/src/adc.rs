//! ADC channel management
//!
//! RP2040 has a single ADC with four external channels:
//! - ADC0: GPIO26
//! - ADC1: GPIO27
//! - ADC2: GPIO28
//! - ADC3: GPIO29

use battisol_hal::{AdcError, AdcReader};
use embassy_rp::adc::{Adc, Blocking, Channel};

/// Number of external ADC channels
pub const ADC_CHANNELS: usize = 4;

/// Blocking ADC over the external channels
///
/// Board channel `n` is the `n`th entry of `channels`; conversions
/// spin until complete.
pub struct RpAdc<'d> {
    adc: Adc<'d, Blocking>,
    channels: [Channel<'d>; ADC_CHANNELS],
}

impl<'d> RpAdc<'d> {
    pub fn new(adc: Adc<'d, Blocking>, channels: [Channel<'d>; ADC_CHANNELS]) -> Self {
        Self { adc, channels }
    }
}

impl AdcReader for RpAdc<'_> {
    fn read(&mut self, channel: u8) -> Result<u16, AdcError> {
        let ch = self
            .channels
            .get_mut(channel as usize)
            .ok_or(AdcError::InvalidChannel)?;
        self.adc.blocking_read(ch).map_err(|_| AdcError::Conversion)
    }

    fn resolution_bits(&self) -> u8 {
        12
    }
}
