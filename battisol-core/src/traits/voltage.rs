//! Voltage measurement traits

/// Measured voltage channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum VoltageChannel {
    /// Starter battery
    Battery,
    /// Isolator control output
    Isolator,
    /// Ignition control output
    Ignition,
    /// Alternator side of the isolator relay
    Alternator,
}

impl VoltageChannel {
    /// All channels in measurement order
    pub const ALL: [VoltageChannel; 4] = [
        VoltageChannel::Battery,
        VoltageChannel::Isolator,
        VoltageChannel::Ignition,
        VoltageChannel::Alternator,
    ];
}

/// One set of voltage readings, in millivolts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Voltages {
    pub battery_mv: u16,
    pub isolator_mv: u16,
    pub ignition_mv: u16,
    pub alternator_mv: u16,
}

impl Voltages {
    /// Get the reading for a single channel
    pub fn get(&self, channel: VoltageChannel) -> u16 {
        match channel {
            VoltageChannel::Battery => self.battery_mv,
            VoltageChannel::Isolator => self.isolator_mv,
            VoltageChannel::Ignition => self.ignition_mv,
            VoltageChannel::Alternator => self.alternator_mv,
        }
    }

    /// Voltage across the isolator relay contacts
    pub fn relay_drop_mv(&self) -> u16 {
        self.alternator_mv.abs_diff(self.battery_mv)
    }

    /// Check if the alternator side sits above the battery
    pub fn alternator_charging(&self) -> bool {
        self.alternator_mv > self.battery_mv
    }
}

/// Trait for the analog voltage source
pub trait VoltageSource {
    /// Refresh all channels
    ///
    /// May spin-wait on the converter; must complete in bounded time.
    fn measure(&mut self);

    /// Get the last reading of a channel in millivolts
    fn millivolts(&self, channel: VoltageChannel) -> u16;

    /// Refresh all channels and return the new readings
    fn sample(&mut self) -> Voltages {
        self.measure();
        Voltages {
            battery_mv: self.millivolts(VoltageChannel::Battery),
            isolator_mv: self.millivolts(VoltageChannel::Isolator),
            ignition_mv: self.millivolts(VoltageChannel::Ignition),
            alternator_mv: self.millivolts(VoltageChannel::Alternator),
        }
    }
}
