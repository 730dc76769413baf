//! Isolator relay over-current guard

use super::bucket::LeakyBucket;
use crate::config::RelayGuardLimits;

/// Over-current guard on the isolator relay contacts
///
/// Watches the voltage across the relay while the isolator is on. Unlike
/// [`Protection`](super::Protection) there is no retry or episode
/// counting; the trip is held for the cooldown and then simply released.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayGuard {
    limits: RelayGuardLimits,
    bucket: LeakyBucket,
    fault: bool,
    cooldown_timer: u16,
}

impl RelayGuard {
    pub fn new(limits: RelayGuardLimits) -> Self {
        Self {
            limits,
            bucket: LeakyBucket::new(),
            fault: false,
            cooldown_timer: 0,
        }
    }

    /// Run one guard step
    ///
    /// The contact drop only counts while the isolator is on. Returns the
    /// latched trip.
    pub fn update(&mut self, isolator_on: bool, drop_mv: u16) -> bool {
        let drop_mv = if isolator_on { drop_mv } else { 0 };
        self.bucket.update(drop_mv, self.limits.drop_limit_mv);

        if self.bucket.exceeds(self.limits.delay) {
            self.fault = true;
            if self.cooldown_timer == 0 {
                self.cooldown_timer = self.limits.cooldown_ticks;
            }
        } else if self.cooldown_timer > 0 {
            self.cooldown_timer -= 1;
        } else {
            self.fault = false;
        }

        self.fault
    }

    /// Blank the guard after the isolator switched
    pub fn arm_deadtime(&mut self) {
        self.bucket.arm_deadtime(self.limits.deadtime_ticks);
    }

    /// Latched trip
    pub fn tripped(&self) -> bool {
        self.fault
    }

    /// Bucket fill level
    pub fn level(&self) -> u8 {
        self.bucket.level()
    }
}
