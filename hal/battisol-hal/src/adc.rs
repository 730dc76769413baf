//! Analog input abstractions

/// ADC error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AdcError {
    /// Channel index not wired on this board
    InvalidChannel,
    /// Conversion did not complete
    Conversion,
}

/// Blocking ADC
///
/// `read` starts a conversion and waits for it to complete. Channels are
/// numbered by the board, not by the chip.
pub trait AdcReader {
    /// Convert one channel
    fn read(&mut self, channel: u8) -> Result<u16, AdcError>;

    /// Converter resolution
    fn resolution_bits(&self) -> u8;

    /// Largest raw value a conversion can return
    fn full_scale(&self) -> u16 {
        ((1u32 << self.resolution_bits()) - 1) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TwelveBit;

    impl AdcReader for TwelveBit {
        fn read(&mut self, _channel: u8) -> Result<u16, AdcError> {
            Ok(0)
        }

        fn resolution_bits(&self) -> u8 {
            12
        }
    }

    #[test]
    fn test_full_scale() {
        assert_eq!(TwelveBit.full_scale(), 4095);
    }
}
