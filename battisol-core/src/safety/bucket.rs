//! Leaky-bucket over-current integrator

/// Saturating severity accumulator
///
/// Fills by `drop / limit` per tick while the drop is over the limit and
/// drains by one per tick otherwise. A dead-time window after a switching
/// event blocks filling but not draining.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LeakyBucket {
    counter: u8,
    deadtime: u8,
}

impl LeakyBucket {
    pub const fn new() -> Self {
        Self {
            counter: 0,
            deadtime: 0,
        }
    }

    /// Advance one tick
    ///
    /// `limit_mv` of 0 disables over-current detection; the bucket then
    /// only drains. Returns whether the drop was over the limit.
    pub fn update(&mut self, drop_mv: u16, limit_mv: u16) -> bool {
        let warning = limit_mv != 0 && drop_mv > limit_mv;

        let blanked = self.deadtime > 0;
        if blanked {
            self.deadtime -= 1;
        }

        if warning && !blanked {
            let severity = (drop_mv / limit_mv).min(u8::MAX as u16) as u8;
            self.counter = self.counter.saturating_add(severity);
        } else {
            self.counter = self.counter.saturating_sub(1);
        }

        warning
    }

    /// Block accumulation for the next `ticks` updates
    pub fn arm_deadtime(&mut self, ticks: u8) {
        self.deadtime = ticks;
    }

    /// Current fill level
    pub fn level(&self) -> u8 {
        self.counter
    }

    /// Remaining dead-time ticks
    pub fn deadtime(&self) -> u8 {
        self.deadtime
    }

    /// Check if the fill level is above `delay`
    pub fn exceeds(&self, delay: u8) -> bool {
        self.counter > delay
    }
}
