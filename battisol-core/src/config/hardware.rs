//! Hardware configuration types
//!
//! These types describe the electrical side of the channels: output stage
//! topology, switch polarity and pull networks. Jumper-selected values are
//! decoded here by [`BootstrapConfig::read`].

use crate::traits::{ConfigSource, Jumper, Pull};

/// Output stage topology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Topology {
    /// Low side only: on = pulled low, off = floating
    OpenDrain,
    /// High side only: on = pulled high, off = floating
    OpenSource,
    /// Both sides: on and off are both actively driven
    PushPull,
    /// Not connected; always floating
    #[default]
    Disabled,
}

/// Output channel configuration, fixed at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputConfig {
    /// Output stage topology
    pub topology: Topology,
    /// Swap on/off levels (push-pull only)
    pub inverted: bool,
    /// Honour externally asserted faults
    pub ext_fault_enabled: bool,
}

impl OutputConfig {
    /// Open-drain output (active low)
    pub const fn open_drain() -> Self {
        Self {
            topology: Topology::OpenDrain,
            inverted: false,
            ext_fault_enabled: false,
        }
    }

    /// Open-source output (active high)
    pub const fn open_source() -> Self {
        Self {
            topology: Topology::OpenSource,
            inverted: false,
            ext_fault_enabled: false,
        }
    }

    /// Same configuration, honouring external faults
    pub const fn with_ext_fault(mut self) -> Self {
        self.ext_fault_enabled = true;
        self
    }
}

/// Electrical level at which a switch counts as active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ActiveLevel {
    /// Active when the pin reads low
    #[default]
    Low,
    /// Active when the pin reads high
    High,
}

impl ActiveLevel {
    /// Raw pin level of the active state
    pub fn level(&self) -> bool {
        matches!(self, ActiveLevel::High)
    }

    /// Raw pin level of the inactive state
    pub fn inactive_level(&self) -> bool {
        !self.level()
    }
}

/// Switch input configuration, fixed at boot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputConfig {
    /// Level at which the switch counts as active
    pub active_level: ActiveLevel,
    /// Ticks a new level must persist beyond before it is committed
    pub debounce_limit: u8,
    /// Pull network while awake
    pub pull: Pull,
}

/// Values selected by the boot jumpers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BootstrapConfig {
    /// Isolator output stage (honours external faults)
    pub isolator_output: OutputConfig,
    /// Ignition output stage
    pub ignition_output: OutputConfig,
    /// Kill switch polarity
    pub kill_active_level: ActiveLevel,
    /// Relay over-current guard escalation enabled
    pub relay_guard_enabled: bool,
}

impl Default for BootstrapConfig {
    /// Configuration with no jumper fitted
    fn default() -> Self {
        Self {
            isolator_output: OutputConfig::open_source().with_ext_fault(),
            ignition_output: OutputConfig::open_source(),
            kill_active_level: ActiveLevel::Low,
            relay_guard_enabled: true,
        }
    }
}

impl BootstrapConfig {
    /// Latch the jumpers and decode them
    pub fn read<C: ConfigSource>(source: &mut C) -> Self {
        source.latch();

        let isolator_output = if source.is_fitted(Jumper::IsolatorOutput) {
            OutputConfig::open_drain()
        } else {
            OutputConfig::open_source()
        };

        let ignition_output = if source.is_fitted(Jumper::IgnitionOutput) {
            OutputConfig::open_drain()
        } else {
            OutputConfig::open_source()
        };

        // Normally-closed kill switch opens (goes high) when pressed
        let kill_active_level = if source.is_fitted(Jumper::KillSwitch) {
            ActiveLevel::High
        } else {
            ActiveLevel::Low
        };

        Self {
            isolator_output: isolator_output.with_ext_fault(),
            ignition_output,
            kill_active_level,
            relay_guard_enabled: !source.is_fitted(Jumper::RelayGuard),
        }
    }
}
