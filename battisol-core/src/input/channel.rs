//! Debounced input channel

use crate::config::InputConfig;
use crate::traits::{Pull, SwitchInput};

/// Debounced state of one switch input
///
/// While blocked (asleep) the level is frozen at the inactive level and the
/// hardware is not sampled.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputChannel {
    config: InputConfig,
    /// Committed raw level
    level: bool,
    /// Level changed since last cleared
    changed: bool,
    /// Asleep; level forced inactive
    blocked: bool,
    /// Consecutive samples disagreeing with `level`
    debounce_timer: u8,
}

impl InputChannel {
    /// Create a channel at its inactive level
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            level: config.active_level.inactive_level(),
            changed: false,
            blocked: false,
            debounce_timer: 0,
        }
    }

    /// Feed one raw sample through the debounce filter
    ///
    /// A level differing from the committed one is taken over once it has
    /// been seen more than `debounce_limit` times in a row.
    pub fn sample(&mut self, raw: bool) {
        if self.blocked {
            return;
        }

        if raw == self.level {
            self.debounce_timer = 0;
            return;
        }

        self.debounce_timer = self.debounce_timer.saturating_add(1);
        if self.debounce_timer > self.config.debounce_limit {
            self.level = raw;
            self.changed = true;
            self.debounce_timer = 0;
        }
    }

    /// Sample the hardware pin, unless asleep
    pub fn poll<I: SwitchInput>(&mut self, hw: &mut I) {
        if self.blocked {
            return;
        }
        let raw = hw.read_level();
        self.sample(raw);
    }

    /// Check if the switch is active
    pub fn is_active(&self) -> bool {
        !self.blocked && self.level == self.config.active_level.level()
    }

    /// Committed raw level
    pub fn level(&self) -> bool {
        self.level
    }

    /// Check if the level changed since the flag was last cleared
    pub fn changed(&self) -> bool {
        self.changed
    }

    /// Acknowledge a level change
    pub fn clear_changed(&mut self) {
        self.changed = false;
    }

    /// Check if the channel is asleep
    pub fn is_blocked(&self) -> bool {
        self.blocked
    }

    /// Put the channel to sleep
    ///
    /// Forces the inactive level, discards any pending change and powers
    /// down the pull network.
    pub fn sleep<I: SwitchInput>(&mut self, hw: &mut I) {
        self.reset_filter();
        hw.set_pull(Pull::None);
        self.blocked = true;
    }

    /// Wake the channel
    ///
    /// Starts again from the inactive level with the configured pull
    /// network restored.
    pub fn wake<I: SwitchInput>(&mut self, hw: &mut I) {
        self.reset_filter();
        hw.set_pull(self.config.pull);
        self.blocked = false;
    }

    fn reset_filter(&mut self) {
        self.level = self.config.active_level.inactive_level();
        self.changed = false;
        self.debounce_timer = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ActiveLevel;
    use crate::mock::MockSwitch;

    fn active_low(debounce_limit: u8) -> InputConfig {
        InputConfig {
            active_level: ActiveLevel::Low,
            debounce_limit,
            pull: Pull::Up,
        }
    }

    #[test]
    fn test_starts_inactive() {
        let channel = InputChannel::new(active_low(10));
        assert!(channel.level());
        assert!(!channel.is_active());
        assert!(!channel.changed());
    }

    #[test]
    fn test_commits_after_limit_exceeded() {
        let mut channel = InputChannel::new(active_low(10));

        for _ in 0..10 {
            channel.sample(false);
        }
        assert!(channel.level());
        assert!(!channel.changed());

        // 11th consecutive sample commits
        channel.sample(false);
        assert!(!channel.level());
        assert!(channel.changed());
        assert!(channel.is_active());
    }

    #[test]
    fn test_short_glitch_is_ignored() {
        let mut channel = InputChannel::new(active_low(10));

        for _ in 0..9 {
            channel.sample(false);
        }
        channel.sample(true);

        assert!(channel.level());
        assert!(!channel.changed());

        // Timer restarted by the agreeing sample
        for _ in 0..10 {
            channel.sample(false);
        }
        assert!(!channel.changed());
    }

    #[test]
    fn test_changed_is_sticky_until_cleared() {
        let mut channel = InputChannel::new(active_low(0));

        channel.sample(false);
        assert!(channel.changed());

        channel.sample(false);
        channel.sample(false);
        assert!(channel.changed());

        channel.clear_changed();
        assert!(!channel.changed());
        assert!(channel.is_active());
    }

    #[test]
    fn test_poll_reads_hardware() {
        let mut hw = MockSwitch::new(false);
        let mut channel = InputChannel::new(active_low(2));

        for _ in 0..3 {
            channel.poll(&mut hw);
        }
        assert!(channel.is_active());
        assert_eq!(hw.reads, 3);
    }

    #[test]
    fn test_sleep_blocks_and_powers_down_pull() {
        let mut hw = MockSwitch::new(false);
        let mut channel = InputChannel::new(active_low(0));
        channel.wake(&mut hw);
        assert_eq!(hw.pull, Pull::Up);

        channel.poll(&mut hw);
        assert!(channel.is_active());

        channel.sleep(&mut hw);
        assert_eq!(hw.pull, Pull::None);
        assert!(channel.is_blocked());
        assert!(!channel.is_active());
        assert!(!channel.changed());

        // Frozen while asleep
        let reads = hw.reads;
        channel.poll(&mut hw);
        channel.sample(false);
        assert_eq!(hw.reads, reads);
        assert!(channel.level());
    }

    #[test]
    fn test_sleep_wake_leaves_no_residual_timer() {
        let mut hw = MockSwitch::new(true);
        let mut channel = InputChannel::new(active_low(10));
        channel.wake(&mut hw);

        // Partial debounce in progress when put to sleep
        for _ in 0..9 {
            channel.sample(false);
        }
        channel.sleep(&mut hw);
        channel.wake(&mut hw);
        assert_eq!(hw.pull, Pull::Up);

        // Unchanged raw signal: no edge on the first post-wake sample
        channel.poll(&mut hw);
        assert!(channel.level());
        assert!(!channel.changed());

        // A single disagreeing sample does not finish the old count
        channel.sample(false);
        channel.sample(false);
        assert!(channel.level());
        assert!(!channel.changed());
    }
}
