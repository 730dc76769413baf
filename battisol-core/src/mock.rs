//! Software fakes of the collaborator traits for host tests

use crate::traits::{
    DriveLevel, HalfBridge, Pull, StatusMode, StatusSink, SwitchInput, VoltageChannel,
    VoltageSource, Voltages,
};

/// Half-bridge that records the last level written
#[derive(Debug, Default)]
pub struct MockHalfBridge {
    pub level: DriveLevel,
    pub writes: u32,
}

impl MockHalfBridge {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HalfBridge for MockHalfBridge {
    fn set_level(&mut self, level: DriveLevel) {
        self.level = level;
        self.writes += 1;
    }
}

/// Switch with a settable raw level
#[derive(Debug)]
pub struct MockSwitch {
    pub raw: bool,
    pub pull: Pull,
    pub reads: u32,
}

impl MockSwitch {
    pub fn new(raw: bool) -> Self {
        Self {
            raw,
            pull: Pull::None,
            reads: 0,
        }
    }
}

impl SwitchInput for MockSwitch {
    fn read_level(&mut self) -> bool {
        self.reads += 1;
        self.raw
    }

    fn set_pull(&mut self, pull: Pull) {
        self.pull = pull;
    }
}

/// Voltage source returning whatever the test puts in `next`
#[derive(Debug, Default)]
pub struct MockVoltages {
    pub next: Voltages,
    measured: Voltages,
    pub measurements: u32,
}

impl MockVoltages {
    pub fn new(next: Voltages) -> Self {
        Self {
            next,
            ..Default::default()
        }
    }
}

impl VoltageSource for MockVoltages {
    fn measure(&mut self) {
        self.measured = self.next;
        self.measurements += 1;
    }

    fn millivolts(&self, channel: VoltageChannel) -> u16 {
        self.measured.get(channel)
    }
}

/// Status sink that records the commanded mode
#[derive(Debug, Default)]
pub struct MockStatus {
    pub mode: StatusMode,
    pub updates: u32,
}

impl StatusSink for MockStatus {
    fn set_mode(&mut self, mode: StatusMode) {
        self.mode = mode;
    }

    fn update(&mut self) {
        self.updates += 1;
    }
}
