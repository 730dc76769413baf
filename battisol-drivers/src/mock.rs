//! Mock pins for driver tests

use battisol_hal::{InputPin, OutputPin, PullControl};

/// Output pin recording its level and number of writes
#[derive(Debug, Default)]
pub struct MockPin {
    pub high: bool,
    pub writes: u32,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }
}

impl OutputPin for MockPin {
    fn set_high(&mut self) {
        self.high = true;
        self.writes += 1;
    }

    fn set_low(&mut self) {
        self.high = false;
        self.writes += 1;
    }

    fn is_set_high(&mut self) -> bool {
        self.high
    }
}

/// Input pin with a settable level and pull-up state
#[derive(Debug, Default)]
pub struct MockInput {
    pub high: bool,
    pub pull_up: bool,
    pub reads: u32,
}

impl MockInput {
    pub fn new(high: bool) -> Self {
        Self {
            high,
            ..Default::default()
        }
    }
}

impl InputPin for MockInput {
    fn is_high(&mut self) -> bool {
        self.reads += 1;
        self.high
    }
}

impl PullControl for MockInput {
    fn enable_pull_up(&mut self, enabled: bool) {
        self.pull_up = enabled;
    }
}
