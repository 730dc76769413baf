//! Switch input with a GPIO-powered pull resistor
//!
//! The external pull resistor of each switch is fed from its own GPIO
//! instead of the supply, so it draws no current while the input sleeps.

use battisol_core::traits::{Pull, SwitchInput};
use battisol_hal::{InputPin, OutputPin};

/// Switch input read on one pin, with its pull network powered by another
pub struct GpioSwitch<S, P> {
    signal: S,
    pull_power: P,
}

impl<S: InputPin, P: OutputPin> GpioSwitch<S, P> {
    /// Create a switch input with the pull network unpowered
    pub fn new(signal: S, pull_power: P) -> Self {
        let mut switch = Self { signal, pull_power };
        switch.set_pull(Pull::None);
        switch
    }
}

impl<S: InputPin, P: OutputPin> SwitchInput for GpioSwitch<S, P> {
    fn read_level(&mut self) -> bool {
        self.signal.is_high()
    }

    /// A low feed turns the resistor into a pull-down, which also serves
    /// as the unpowered state
    fn set_pull(&mut self, pull: Pull) {
        self.pull_power.set_state(pull == Pull::Up);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockInput, MockPin};

    #[test]
    fn test_pull_power() {
        let mut switch = GpioSwitch::new(MockInput::new(true), MockPin::new());
        assert!(!switch.pull_power.high);

        switch.set_pull(Pull::Up);
        assert!(switch.pull_power.high);

        switch.set_pull(Pull::Down);
        assert!(!switch.pull_power.high);

        switch.set_pull(Pull::Up);
        switch.set_pull(Pull::None);
        assert!(!switch.pull_power.high);
    }

    #[test]
    fn test_reads_signal() {
        let mut switch = GpioSwitch::new(MockInput::new(true), MockPin::new());
        assert!(switch.read_level());

        switch.signal.high = false;
        assert!(!switch.read_level());
        assert_eq!(switch.signal.reads, 2);
    }
}
