//! Configuration types
//!
//! Two layers feed the controller:
//! - [`Tuning`]: limits, delays and timeouts fixed at build time
//! - [`BootstrapConfig`]: output topologies and switch polarity read from
//!   the boot jumpers once at power-up
//!
//! [`ControllerConfig`] combines both into the immutable configuration the
//! controller runs with.

pub mod hardware;
pub mod types;

pub use hardware::*;
pub use types::*;

use crate::traits::Pull;

/// Complete controller configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ControllerConfig {
    /// Limits, delays and timeouts
    pub tuning: Tuning,
    /// Isolator output stage
    pub isolator_output: OutputConfig,
    /// Ignition output stage
    pub ignition_output: OutputConfig,
    /// Master switch input
    pub master_input: InputConfig,
    /// Kill switch input
    pub kill_input: InputConfig,
    /// Whether a relay guard trip escalates to a kill
    pub relay_guard_enabled: bool,
}

impl ControllerConfig {
    /// Build the configuration from tuning tables and latched jumpers
    ///
    /// The master switch is always active-low with a pull-up; the kill
    /// switch polarity comes from the jumpers.
    pub fn new(tuning: Tuning, bootstrap: BootstrapConfig) -> Self {
        Self {
            tuning,
            isolator_output: bootstrap.isolator_output,
            ignition_output: bootstrap.ignition_output,
            master_input: InputConfig {
                active_level: ActiveLevel::Low,
                debounce_limit: tuning.inputs.master_debounce,
                pull: Pull::Up,
            },
            kill_input: InputConfig {
                active_level: bootstrap.kill_active_level,
                debounce_limit: tuning.inputs.kill_debounce,
                pull: Pull::Up,
            },
            relay_guard_enabled: bootstrap.relay_guard_enabled,
        }
    }
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self::new(Tuning::default(), BootstrapConfig::default())
    }
}
