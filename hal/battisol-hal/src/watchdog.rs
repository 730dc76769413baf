//! Watchdog abstraction

/// Reset watchdog
///
/// Once started the watchdog resets the chip unless fed within the
/// timeout. It cannot be stopped again.
pub trait Watchdog {
    /// Start the watchdog
    fn start(&mut self, timeout_ms: u32);

    /// Restart the timeout
    fn feed(&mut self);
}
