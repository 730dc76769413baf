//! Hardware watchdog

use battisol_hal::Watchdog;
use embassy_rp::watchdog::Watchdog as RpWatchdogPeripheral;
use embassy_time::Duration;

/// RP2040 watchdog
pub struct RpWatchdog {
    inner: RpWatchdogPeripheral,
}

impl RpWatchdog {
    pub fn new(inner: RpWatchdogPeripheral) -> Self {
        Self { inner }
    }
}

impl Watchdog for RpWatchdog {
    fn start(&mut self, timeout_ms: u32) {
        self.inner.start(Duration::from_millis(timeout_ms as u64));
    }

    fn feed(&mut self) {
        self.inner.feed();
    }
}
