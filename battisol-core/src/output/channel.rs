//! Protected output channel

use super::drive::map_level;
use super::MAX_FAULT_EXEC_DELAY;
use crate::config::{OutputConfig, ProtectionLimits};
use crate::safety::Protection;
use crate::traits::{DriveLevel, HalfBridge};

/// One protected half-bridge output
///
/// Commands (`set`, `enable`, ...) only change intent. The output stage is
/// touched exclusively by [`apply`](Self::apply), which also decides whether
/// protection overrides the intent.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OutputChannel {
    config: OutputConfig,
    /// Commanded logical state
    target: bool,
    /// Disabled outputs always float
    enabled: bool,
    /// Logical state actually applied
    real: bool,
    /// Drive level actually asserted
    hw_level: DriveLevel,
    ext_fault: bool,
    /// Ticks for which `apply` holds the current level
    delay_exec: u8,
    protection: Protection,
}

impl OutputChannel {
    /// Create a channel that is off, disabled and floating
    pub fn new(config: OutputConfig, limits: ProtectionLimits) -> Self {
        Self {
            config,
            target: false,
            enabled: false,
            real: false,
            hw_level: DriveLevel::HiZ,
            ext_fault: false,
            delay_exec: 0,
            protection: Protection::new(limits),
        }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Command the output on
    pub fn set(&mut self) {
        self.target = true;
    }

    /// Command the output off
    pub fn reset(&mut self) {
        self.target = false;
    }

    pub fn enable(&mut self) {
        self.enabled = true;
    }

    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn target(&self) -> bool {
        self.target
    }

    /// Assert an external fault
    ///
    /// Ignored unless the output is configured to honour external faults.
    pub fn set_external_fault(&mut self) {
        if self.config.ext_fault_enabled {
            self.ext_fault = true;
        }
    }

    pub fn clear_external_fault(&mut self) {
        self.ext_fault = false;
    }

    /// Hold the current drive level for `cycles` applies
    ///
    /// Capped at [`MAX_FAULT_EXEC_DELAY`].
    pub fn delay_fault_execution(&mut self, cycles: u8) {
        self.delay_exec = cycles.min(MAX_FAULT_EXEC_DELAY);
    }

    /// Protection fault or honoured external fault
    pub fn has_fault(&self) -> bool {
        self.protection.fault() || self.ext_fault
    }

    pub fn retry_flag(&self) -> bool {
        self.protection.retry_flag()
    }

    pub fn clear_retry_flag(&mut self) {
        self.protection.clear_retry_flag();
    }

    pub fn fault_count(&self) -> u8 {
        self.protection.fault_count()
    }

    pub fn clear_fault_history(&mut self) {
        self.protection.clear_fault_history();
    }

    /// Logical state last applied to the output stage
    pub fn is_on(&self) -> bool {
        self.real
    }

    pub fn hw_level(&self) -> DriveLevel {
        self.hw_level
    }

    pub fn protection(&self) -> &Protection {
        &self.protection
    }

    /// Run the protection engine against fresh measurements
    pub fn protect(&mut self, pwrsrc_mv: u16, out_mv: u16) -> bool {
        self.protection.update(self.hw_level, pwrsrc_mv, out_mv)
    }

    /// Drive the output stage
    ///
    /// A pending execution delay holds the current level. Otherwise a fault
    /// or a disabled channel floats the output, and a healthy enabled one
    /// follows its target. Actually changing the level blanks over-current
    /// detection for the protection dead-time.
    pub fn apply<H: HalfBridge>(&mut self, hw: &mut H) {
        if self.delay_exec > 0 {
            self.delay_exec -= 1;
            return;
        }

        let level = if self.has_fault() || !self.enabled {
            self.real = false;
            DriveLevel::HiZ
        } else {
            self.real = self.target;
            map_level(&self.config, self.target)
        };

        if level != self.hw_level {
            self.protection.arm_deadtime();
        }

        hw.set_level(level);
        self.hw_level = level;
    }
}
