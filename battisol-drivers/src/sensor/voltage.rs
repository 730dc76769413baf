//! ADC voltage monitor
//!
//! Each monitored point is brought to an ADC input through a resistive
//! divider, so a single fixed scale converts raw counts to millivolts.

use battisol_core::traits::{VoltageChannel, VoltageSource};
use battisol_hal::{AdcError, AdcReader};

/// ADC input wired to each monitored point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChannelMap {
    pub battery: u8,
    pub isolator: u8,
    pub ignition: u8,
    pub alternator: u8,
}

impl ChannelMap {
    fn adc_channel(&self, channel: VoltageChannel) -> u8 {
        match channel {
            VoltageChannel::Battery => self.battery,
            VoltageChannel::Isolator => self.isolator,
            VoltageChannel::Ignition => self.ignition,
            VoltageChannel::Alternator => self.alternator,
        }
    }
}

fn slot(channel: VoltageChannel) -> usize {
    match channel {
        VoltageChannel::Battery => 0,
        VoltageChannel::Isolator => 1,
        VoltageChannel::Ignition => 2,
        VoltageChannel::Alternator => 3,
    }
}

/// Voltage source over a blocking ADC
///
/// A failed conversion keeps the previous value of that channel.
pub struct AdcVoltageMonitor<A> {
    adc: A,
    map: ChannelMap,
    /// Divider-corrected scale
    mv_per_lsb: u16,
    millivolts: [u16; 4],
    errors: u32,
    last_error: Option<AdcError>,
}

impl<A: AdcReader> AdcVoltageMonitor<A> {
    /// Create a monitor; all channels read 0 until the first measurement
    pub fn new(adc: A, map: ChannelMap, mv_per_lsb: u16) -> Self {
        Self {
            adc,
            map,
            mv_per_lsb,
            millivolts: [0; 4],
            errors: 0,
            last_error: None,
        }
    }

    /// Conversions that failed since start-up
    pub fn error_count(&self) -> u32 {
        self.errors
    }

    pub fn last_error(&self) -> Option<AdcError> {
        self.last_error
    }
}

impl<A: AdcReader> VoltageSource for AdcVoltageMonitor<A> {
    fn measure(&mut self) {
        for channel in VoltageChannel::ALL {
            match self.adc.read(self.map.adc_channel(channel)) {
                Ok(raw) => {
                    self.millivolts[slot(channel)] = raw.saturating_mul(self.mv_per_lsb);
                }
                Err(e) => {
                    self.errors = self.errors.saturating_add(1);
                    self.last_error = Some(e);
                }
            }
        }
    }

    fn millivolts(&self, channel: VoltageChannel) -> u16 {
        self.millivolts[slot(channel)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FakeAdc {
        raw: [u16; 4],
        failing: Option<u8>,
    }

    impl AdcReader for FakeAdc {
        fn read(&mut self, channel: u8) -> Result<u16, AdcError> {
            if self.failing == Some(channel) {
                return Err(AdcError::Conversion);
            }
            self.raw
                .get(channel as usize)
                .copied()
                .ok_or(AdcError::InvalidChannel)
        }

        fn resolution_bits(&self) -> u8 {
            10
        }
    }

    const MAP: ChannelMap = ChannelMap {
        battery: 0,
        isolator: 1,
        ignition: 2,
        alternator: 3,
    };

    #[test]
    fn test_scaling() {
        let adc = FakeAdc {
            raw: [600, 590, 0, 700],
            failing: None,
        };
        let mut monitor = AdcVoltageMonitor::new(adc, MAP, 20);

        let v = monitor.sample();
        assert_eq!(v.battery_mv, 12_000);
        assert_eq!(v.isolator_mv, 11_800);
        assert_eq!(v.ignition_mv, 0);
        assert_eq!(v.alternator_mv, 14_000);
    }

    #[test]
    fn test_channel_mapping() {
        let adc = FakeAdc {
            raw: [1, 2, 3, 4],
            failing: None,
        };
        let map = ChannelMap {
            battery: 3,
            isolator: 2,
            ignition: 1,
            alternator: 0,
        };
        let mut monitor = AdcVoltageMonitor::new(adc, map, 1);
        monitor.measure();

        assert_eq!(monitor.millivolts(VoltageChannel::Battery), 4);
        assert_eq!(monitor.millivolts(VoltageChannel::Alternator), 1);
    }

    #[test]
    fn test_failed_conversion_keeps_last_value() {
        let adc = FakeAdc {
            raw: [600, 600, 600, 600],
            failing: None,
        };
        let mut monitor = AdcVoltageMonitor::new(adc, MAP, 20);
        monitor.measure();

        monitor.adc.raw = [500; 4];
        monitor.adc.failing = Some(0);
        monitor.measure();

        assert_eq!(monitor.millivolts(VoltageChannel::Battery), 12_000);
        assert_eq!(monitor.millivolts(VoltageChannel::Isolator), 10_000);
        assert_eq!(monitor.error_count(), 1);
        assert_eq!(monitor.last_error(), Some(AdcError::Conversion));
    }

    #[test]
    fn test_scale_saturates() {
        let adc = FakeAdc {
            raw: [u16::MAX; 4],
            failing: None,
        };
        let mut monitor = AdcVoltageMonitor::new(adc, MAP, 20);
        monitor.measure();
        assert_eq!(monitor.millivolts(VoltageChannel::Battery), u16::MAX);
    }
}
