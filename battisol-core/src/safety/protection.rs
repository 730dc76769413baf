//! Per-output protection engine

use super::bucket::LeakyBucket;
use crate::config::ProtectionLimits;
use crate::traits::DriveLevel;

/// Protection state for one half-bridge output
///
/// Over- and under-voltage trip instantly. Over-current is integrated by a
/// [`LeakyBucket`] so that only sustained conduction drop trips. A fault is
/// held for at least the cooldown, then cleared with a one-shot retry
/// notification. Fault episodes are counted until the output has stayed
/// healthy for the retry timeout.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Protection {
    limits: ProtectionLimits,
    ovp_warning: bool,
    uvp_warning: bool,
    ocp_warning: bool,
    bucket: LeakyBucket,
    fault: bool,
    cooldown_timer: u16,
    retry_flag: bool,
    retry_timer: u16,
    fault_cnt: u8,
}

impl Protection {
    /// Create a protection engine with no fault history
    pub fn new(limits: ProtectionLimits) -> Self {
        Self {
            limits,
            ovp_warning: false,
            uvp_warning: false,
            ocp_warning: false,
            bucket: LeakyBucket::new(),
            fault: false,
            cooldown_timer: 0,
            retry_flag: false,
            retry_timer: 0,
            fault_cnt: 0,
        }
    }

    /// Run one protection step
    ///
    /// # Arguments
    /// - `hw_level`: drive level currently asserted on the output
    /// - `pwrsrc_mv`: voltage of the rail feeding the output
    /// - `out_mv`: voltage measured on the output
    ///
    /// Returns the latched fault verdict.
    pub fn update(&mut self, hw_level: DriveLevel, pwrsrc_mv: u16, out_mv: u16) -> bool {
        let drop_mv = conduction_drop(hw_level, pwrsrc_mv, out_mv);
        let limits = &self.limits;

        self.ovp_warning = limits.ovp_limit_mv != 0 && pwrsrc_mv > limits.ovp_limit_mv;
        self.uvp_warning = limits.uvp_limit_mv != 0 && pwrsrc_mv < limits.uvp_limit_mv;
        self.ocp_warning = self.bucket.update(drop_mv, limits.drop_limit_mv);

        let tripped =
            self.ovp_warning || self.uvp_warning || self.bucket.exceeds(self.limits.ocp_delay);

        if tripped {
            if !self.fault {
                self.fault_cnt = self.fault_cnt.saturating_add(1);
            }
            self.fault = true;
            if self.cooldown_timer == 0 {
                self.cooldown_timer = self.limits.cooldown_ticks;
            }
        } else if self.cooldown_timer > 0 {
            self.cooldown_timer -= 1;
        } else if self.fault {
            self.fault = false;
            self.retry_flag = true;
            self.retry_timer = self.limits.retry_timeout_ticks;
        } else if self.retry_timer > 0 {
            self.retry_timer -= 1;
        } else {
            self.fault_cnt = 0;
        }

        self.fault
    }

    /// Suppress over-current accumulation after a drive level change
    pub fn arm_deadtime(&mut self) {
        self.bucket.arm_deadtime(self.limits.deadtime_ticks);
    }

    /// Latched fault verdict
    pub fn fault(&self) -> bool {
        self.fault
    }

    /// Over-voltage warning from the last step
    pub fn ovp_warning(&self) -> bool {
        self.ovp_warning
    }

    /// Under-voltage warning from the last step
    pub fn uvp_warning(&self) -> bool {
        self.uvp_warning
    }

    /// Over-current warning from the last step
    pub fn ocp_warning(&self) -> bool {
        self.ocp_warning
    }

    /// Over-current bucket fill level
    pub fn ocp_counter(&self) -> u8 {
        self.bucket.level()
    }

    /// Remaining fault hold time
    pub fn cooldown_remaining(&self) -> u16 {
        self.cooldown_timer
    }

    /// Check if a fault has cleared since the flag was last reset
    pub fn retry_flag(&self) -> bool {
        self.retry_flag
    }

    pub fn clear_retry_flag(&mut self) {
        self.retry_flag = false;
    }

    /// Fault episodes since the output was last healthy for a full retry
    /// timeout
    pub fn fault_count(&self) -> u8 {
        self.fault_cnt
    }

    /// Forget counted fault episodes
    pub fn clear_fault_history(&mut self) {
        self.fault_cnt = 0;
        self.retry_timer = 0;
    }
}

/// Voltage across the conducting switch
///
/// High side: rail minus output. Low side: the output itself. Floating
/// outputs carry no current.
fn conduction_drop(hw_level: DriveLevel, pwrsrc_mv: u16, out_mv: u16) -> u16 {
    match hw_level {
        DriveLevel::High => pwrsrc_mv.saturating_sub(out_mv),
        DriveLevel::Low => out_mv,
        DriveLevel::HiZ => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limits() -> ProtectionLimits {
        ProtectionLimits {
            ovp_limit_mv: 16_000,
            uvp_limit_mv: 0,
            drop_limit_mv: 500,
            ocp_delay: 2,
            cooldown_ticks: 10,
            deadtime_ticks: 3,
            retry_timeout_ticks: 20,
        }
    }

    #[test]
    fn test_conduction_drop() {
        assert_eq!(conduction_drop(DriveLevel::High, 12_000, 11_400), 600);
        assert_eq!(conduction_drop(DriveLevel::High, 12_000, 12_500), 0);
        assert_eq!(conduction_drop(DriveLevel::Low, 12_000, 300), 300);
        assert_eq!(conduction_drop(DriveLevel::HiZ, 12_000, 0), 0);
    }

    #[test]
    fn test_ocp_trips_after_delay() {
        let mut prot = Protection::new(limits());

        assert!(!prot.update(DriveLevel::High, 12_000, 11_400));
        assert!(!prot.update(DriveLevel::High, 12_000, 11_400));
        assert!(prot.ocp_warning());

        // Bucket now exceeds the delay of 2
        assert!(prot.update(DriveLevel::High, 12_000, 11_400));
        assert_eq!(prot.fault_count(), 1);
        assert_eq!(prot.cooldown_remaining(), 10);
    }

    #[test]
    fn test_floating_output_never_trips_ocp() {
        let mut prot = Protection::new(limits());
        for _ in 0..50 {
            assert!(!prot.update(DriveLevel::HiZ, 12_000, 0));
        }
        assert_eq!(prot.ocp_counter(), 0);
    }

    #[test]
    fn test_fault_held_through_cooldown() {
        let mut prot = Protection::new(limits());

        // One tick over voltage
        assert!(prot.update(DriveLevel::HiZ, 17_000, 0));
        assert!(prot.ovp_warning());

        // Condition gone, fault stays for the cooldown
        for _ in 0..10 {
            assert!(prot.update(DriveLevel::HiZ, 12_000, 0));
            assert!(!prot.ovp_warning());
        }
        assert_eq!(prot.cooldown_remaining(), 0);
        assert!(!prot.retry_flag());

        assert!(!prot.update(DriveLevel::HiZ, 12_000, 0));
        assert!(prot.retry_flag());

        prot.clear_retry_flag();
        assert!(!prot.retry_flag());
    }

    #[test]
    fn test_fault_count_forgotten_after_retry_timeout() {
        let mut prot = Protection::new(limits());

        prot.update(DriveLevel::HiZ, 17_000, 0);
        for _ in 0..11 {
            prot.update(DriveLevel::HiZ, 12_000, 0);
        }
        assert!(!prot.fault());
        assert_eq!(prot.fault_count(), 1);

        for _ in 0..20 {
            prot.update(DriveLevel::HiZ, 12_000, 0);
            assert_eq!(prot.fault_count(), 1);
        }

        prot.update(DriveLevel::HiZ, 12_000, 0);
        assert_eq!(prot.fault_count(), 0);
    }

    #[test]
    fn test_recurrence_inside_retry_window_keeps_count() {
        let mut prot = Protection::new(limits());

        for episode in 1..=3u8 {
            assert!(prot.update(DriveLevel::HiZ, 17_000, 0));
            assert_eq!(prot.fault_count(), episode);

            // Cooldown plus the clearing tick, then part of the retry window
            for _ in 0..16 {
                prot.update(DriveLevel::HiZ, 12_000, 0);
            }
            assert!(!prot.fault());
        }
        assert_eq!(prot.fault_count(), 3);
    }

    #[test]
    fn test_sustained_fault_counts_once() {
        let mut prot = Protection::new(limits());
        for _ in 0..40 {
            assert!(prot.update(DriveLevel::HiZ, 17_000, 0));
        }
        assert_eq!(prot.fault_count(), 1);
    }

    #[test]
    fn test_deadtime_after_switching() {
        let mut prot = Protection::new(limits());
        prot.arm_deadtime();

        for _ in 0..3 {
            assert!(!prot.update(DriveLevel::High, 12_000, 10_000));
        }
        assert_eq!(prot.ocp_counter(), 0);

        prot.update(DriveLevel::High, 12_000, 10_000);
        assert_eq!(prot.ocp_counter(), 4);
        assert!(prot.fault());
    }

    #[test]
    fn test_under_voltage() {
        let mut prot = Protection::new(ProtectionLimits {
            uvp_limit_mv: 10_000,
            ..limits()
        });
        assert!(!prot.update(DriveLevel::HiZ, 10_000, 0));
        assert!(prot.update(DriveLevel::HiZ, 9_999, 0));
        assert!(prot.uvp_warning());
    }

    #[test]
    fn test_clear_fault_history() {
        let mut prot = Protection::new(limits());
        prot.update(DriveLevel::HiZ, 17_000, 0);
        prot.clear_fault_history();
        assert_eq!(prot.fault_count(), 0);

        // The latched fault itself is untouched
        assert!(prot.fault());
    }
}
