//! Single status LED

use battisol_core::traits::{StatusMode, StatusSink};
use battisol_hal::OutputPin;

/// Status LED on an active-high pin
///
/// Flashing toggles the LED every half period. Changing the flash period
/// keeps the running half-period countdown, so repeated commands do not
/// restart the blink.
///
/// The flash period is nominal: each half lasts `period / 2 + 1` ticks,
/// counting the toggle tick itself, so `Flashing(4)` repeats every 6 ticks.
pub struct StatusLed<P> {
    pin: P,
    mode: StatusMode,
    /// Ticks until the next toggle
    timer: u16,
    /// Half flash period
    half_period: u16,
}

impl<P: OutputPin> StatusLed<P> {
    /// Create a status LED, initially off
    pub fn new(mut pin: P) -> Self {
        pin.set_low();
        Self {
            pin,
            mode: StatusMode::Off,
            timer: 0,
            half_period: 0,
        }
    }

    pub fn mode(&self) -> StatusMode {
        self.mode
    }

    pub fn is_lit(&mut self) -> bool {
        self.pin.is_set_high()
    }
}

impl<P: OutputPin> StatusSink for StatusLed<P> {
    fn set_mode(&mut self, mode: StatusMode) {
        match mode {
            StatusMode::Flashing(period) => {
                self.half_period = period.max(2) / 2;
            }
            StatusMode::Off | StatusMode::Solid => {
                self.timer = 0;
            }
        }
        self.mode = mode;
    }

    fn update(&mut self) {
        match self.mode {
            StatusMode::Solid => self.pin.set_high(),
            StatusMode::Flashing(_) => {
                if self.timer > 0 {
                    self.timer -= 1;
                } else {
                    self.pin.toggle();
                    self.timer = self.half_period;
                }
            }
            StatusMode::Off => self.pin.set_low(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockPin;

    #[test]
    fn test_solid_and_off() {
        let mut led = StatusLed::new(MockPin::new());

        led.set_mode(StatusMode::Solid);
        led.update();
        assert!(led.is_lit());

        led.set_mode(StatusMode::Off);
        led.update();
        assert!(!led.is_lit());
    }

    #[test]
    fn test_flashing_toggles_every_half_period() {
        let mut led = StatusLed::new(MockPin::new());
        led.set_mode(StatusMode::Flashing(4));

        // Toggles immediately, then holds for two ticks
        let lit: Vec<bool> = (0..9)
            .map(|_| {
                led.update();
                led.is_lit()
            })
            .collect();
        assert_eq!(
            lit,
            [true, true, true, false, false, false, true, true, true]
        );
    }

    #[test]
    fn test_period_clamped() {
        let mut led = StatusLed::new(MockPin::new());
        led.set_mode(StatusMode::Flashing(0));

        led.update();
        assert!(led.is_lit());
        led.update();
        assert!(led.is_lit());
        led.update();
        assert!(!led.is_lit());
    }

    #[test]
    fn test_recommanding_keeps_phase() {
        let mut led = StatusLed::new(MockPin::new());
        led.set_mode(StatusMode::Flashing(10));
        led.update();
        led.update();
        led.update();
        assert!(led.is_lit());

        // Same command every tick must not restart the countdown
        for _ in 0..4 {
            led.set_mode(StatusMode::Flashing(10));
            led.update();
        }
        assert!(!led.is_lit());
    }
}
