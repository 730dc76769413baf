//! Boot jumper bank
//!
//! Four jumpers to ground, read through internal pull-ups. A fitted jumper
//! reads low.

use battisol_core::traits::{ConfigSource, Jumper};
use battisol_hal::{InputPin, PullControl};

/// Jumper bank latched once at boot
pub struct JumperBank<P> {
    pins: [P; 4],
    fitted: [bool; 4],
    latched: bool,
}

impl<P: InputPin + PullControl> JumperBank<P> {
    /// Create the bank with pull-ups enabled, ready to latch
    pub fn new(mut pins: [P; 4]) -> Self {
        for pin in pins.iter_mut() {
            pin.enable_pull_up(true);
        }
        Self {
            pins,
            fitted: [false; 4],
            latched: false,
        }
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Raw fitted mask, bit n = jumper n
    pub fn mask(&self) -> u8 {
        self.fitted
            .iter()
            .enumerate()
            .fold(0, |mask, (n, &fitted)| mask | ((fitted as u8) << n))
    }
}

impl<P: InputPin + PullControl> ConfigSource for JumperBank<P> {
    /// Read all jumpers, then switch the pull-ups off
    ///
    /// Later calls keep the first reading.
    fn latch(&mut self) {
        if self.latched {
            return;
        }

        for (fitted, pin) in self.fitted.iter_mut().zip(self.pins.iter_mut()) {
            *fitted = pin.is_low();
            pin.enable_pull_up(false);
        }
        self.latched = true;
    }

    fn is_fitted(&self, jumper: Jumper) -> bool {
        self.fitted[jumper as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockInput;

    fn bank(levels: [bool; 4]) -> JumperBank<MockInput> {
        JumperBank::new(levels.map(MockInput::new))
    }

    #[test]
    fn test_pull_ups_only_while_reading() {
        let mut bank = bank([true; 4]);
        assert!(bank.pins.iter().all(|p| p.pull_up));

        bank.latch();
        assert!(bank.pins.iter().all(|p| !p.pull_up));
        assert!(bank.is_latched());
    }

    #[test]
    fn test_fitted_reads_low() {
        let mut bank = bank([false, true, true, false]);
        bank.latch();

        assert!(bank.is_fitted(Jumper::IsolatorOutput));
        assert!(!bank.is_fitted(Jumper::IgnitionOutput));
        assert!(!bank.is_fitted(Jumper::KillSwitch));
        assert!(bank.is_fitted(Jumper::RelayGuard));
        assert_eq!(bank.mask(), 0b1001);
    }

    #[test]
    fn test_latches_once() {
        let mut bank = bank([true; 4]);
        bank.latch();

        bank.pins[0].high = false;
        bank.latch();
        assert!(!bank.is_fitted(Jumper::IsolatorOutput));
        assert_eq!(bank.pins[0].reads, 1);
    }
}
