//! Tuning type definitions
//!
//! These types hold every limit, delay and timeout of the controller. All
//! durations are in control ticks. The firmware fixes them at build time
//! from a TOML table, so every struct deserializes with missing keys
//! falling back to the defaults below.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::output::MAX_FAULT_EXEC_DELAY;

/// Protection limits for one half-bridge output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ProtectionLimits {
    /// Power source over-voltage limit in mV (0 = disabled)
    pub ovp_limit_mv: u16,
    /// Power source under-voltage limit in mV (0 = disabled)
    pub uvp_limit_mv: u16,
    /// Switch voltage drop limit in mV (0 = over-current detection disabled)
    pub drop_limit_mv: u16,
    /// Bucket level that must be exceeded to declare an over-current fault
    pub ocp_delay: u8,
    /// Minimum fault duration
    pub cooldown_ticks: u16,
    /// Over-current blanking after a drive level change
    pub deadtime_ticks: u8,
    /// Fault-free time after which the episode count is forgotten
    pub retry_timeout_ticks: u16,
}

impl ProtectionLimits {
    pub const DEFAULT: Self = Self {
        ovp_limit_mv: 0,
        uvp_limit_mv: 0,
        drop_limit_mv: 500,
        ocp_delay: 2,
        cooldown_ticks: 2000,
        deadtime_ticks: 0,
        retry_timeout_ticks: 2000,
    };
}

impl Default for ProtectionLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Limits for the isolator relay over-current guard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RelayGuardLimits {
    /// Contact voltage drop limit in mV (0 = disabled)
    pub drop_limit_mv: u16,
    /// Bucket level that must be exceeded to trip
    pub delay: u8,
    /// Minimum trip duration
    pub cooldown_ticks: u16,
    /// Blanking after the isolator switches
    pub deadtime_ticks: u8,
}

impl RelayGuardLimits {
    pub const DEFAULT: Self = Self {
        drop_limit_mv: 500,
        delay: 20,
        cooldown_ticks: 1000,
        deadtime_ticks: 5,
    };
}

impl Default for RelayGuardLimits {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Switch input debounce settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InputTiming {
    pub master_debounce: u8,
    pub kill_debounce: u8,
}

impl InputTiming {
    pub const DEFAULT: Self = Self {
        master_debounce: 10,
        kill_debounce: 10,
    };
}

impl Default for InputTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// State machine timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SequenceTiming {
    /// Wait after waking the kill input before the isolator is tried
    pub startup_settle_ticks: u16,
    /// Isolator observation window before ignition is turned on
    pub isolator_check_ticks: u16,
    /// Ignition observation window before the system goes active
    pub ignition_check_ticks: u16,
    /// Alternator rundown allowance when killed by the kill switch
    pub kill_rundown_external_ticks: u16,
    /// Alternator rundown allowance when killed by master release
    pub kill_rundown_master_ticks: u16,
    /// Alternator voltage below which rundown counts as complete (mV)
    pub alternator_active_mv: u16,
    /// Settle time between isolator off and both outputs disabled
    pub isolator_release_ticks: u16,
    /// Time master must stay released before lockout ends
    pub lockout_dwell_ticks: u16,
    /// Time the lockout indicator keeps flashing
    pub lockout_indicator_ticks: u16,
    /// Indicator period while killing
    pub kill_flash_period: u16,
    /// Indicator period during lockout
    pub lockout_flash_period: u16,
    /// Ignition fault episodes tolerated while active
    pub ignition_fault_limit: u8,
    /// Drive hold applied to the isolator on escalation
    pub escalation_hold_ticks: u8,
    /// Voltage samples taken at power-up before the jumpers are read
    pub boot_settle_samples: u16,
    /// Input samples gathered at power-up before the first phase is chosen
    pub boot_gather_ticks: u16,
}

impl SequenceTiming {
    pub const DEFAULT: Self = Self {
        startup_settle_ticks: 100,
        isolator_check_ticks: 100,
        ignition_check_ticks: 100,
        kill_rundown_external_ticks: 100,
        kill_rundown_master_ticks: 100,
        alternator_active_mv: 10_000,
        isolator_release_ticks: 100,
        lockout_dwell_ticks: 5000,
        lockout_indicator_ticks: 30_000,
        kill_flash_period: 200,
        lockout_flash_period: 1000,
        ignition_fault_limit: 5,
        escalation_hold_ticks: 2,
        boot_settle_samples: 10,
        boot_gather_ticks: 100,
    };
}

impl Default for SequenceTiming {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// All build-time tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Tuning {
    pub isolator: ProtectionLimits,
    pub ignition: ProtectionLimits,
    pub relay_guard: RelayGuardLimits,
    pub inputs: InputTiming,
    pub sequence: SequenceTiming,
}

impl Tuning {
    pub const DEFAULT: Self = Self {
        isolator: ProtectionLimits::DEFAULT,
        ignition: ProtectionLimits::DEFAULT,
        relay_guard: RelayGuardLimits::DEFAULT,
        inputs: InputTiming::DEFAULT,
        sequence: SequenceTiming::DEFAULT,
    };

    /// Check the tuning for values that silently disable a function
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_protection(&self.isolator, LimitSet::Isolator)?;
        validate_protection(&self.ignition, LimitSet::Ignition)?;

        if self.relay_guard.drop_limit_mv != 0 && self.relay_guard.delay == u8::MAX {
            return Err(ConfigError::OcpDelayUnreachable(LimitSet::RelayGuard));
        }

        if self.inputs.master_debounce == u8::MAX || self.inputs.kill_debounce == u8::MAX {
            return Err(ConfigError::DebounceUnreachable);
        }

        let seq = &self.sequence;
        if seq.escalation_hold_ticks > MAX_FAULT_EXEC_DELAY {
            return Err(ConfigError::EscalationHoldTooLong);
        }
        if seq.kill_flash_period < 2 || seq.lockout_flash_period < 2 {
            return Err(ConfigError::FlashPeriodTooShort);
        }

        Ok(())
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Self::DEFAULT
    }
}

fn validate_protection(limits: &ProtectionLimits, set: LimitSet) -> Result<(), ConfigError> {
    if limits.drop_limit_mv != 0 && limits.ocp_delay == u8::MAX {
        return Err(ConfigError::OcpDelayUnreachable(set));
    }

    if limits.ovp_limit_mv != 0
        && limits.uvp_limit_mv != 0
        && limits.uvp_limit_mv >= limits.ovp_limit_mv
    {
        return Err(ConfigError::VoltageWindowInverted(set));
    }

    Ok(())
}

/// Which limit table a validation error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LimitSet {
    Isolator,
    Ignition,
    RelayGuard,
}

/// Tuning validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Over-current delay of 255 can never be exceeded by the bucket
    OcpDelayUnreachable(LimitSet),
    /// Under-voltage limit at or above the over-voltage limit
    VoltageWindowInverted(LimitSet),
    /// Debounce limit of 255 never commits a change
    DebounceUnreachable,
    /// Escalation hold longer than the drive mapper accepts
    EscalationHoldTooLong,
    /// Flash period shorter than one on/off cycle
    FlashPeriodTooShort,
}
