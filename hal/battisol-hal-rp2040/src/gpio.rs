//! GPIO helpers

use battisol_hal::{InputPin, PullControl};
use embassy_rp::gpio::{AnyPin, Flex, Pull};
use embassy_rp::Peri;

/// Input pin whose pull-up can be switched off after use
pub struct JumperPin<'d> {
    pin: Flex<'d>,
}

impl<'d> JumperPin<'d> {
    /// Configure the pin as an input, pull-up off
    pub fn new(pin: Peri<'d, AnyPin>) -> Self {
        let mut pin = Flex::new(pin);
        pin.set_as_input();
        pin.set_pull(Pull::None);
        Self { pin }
    }
}

impl InputPin for JumperPin<'_> {
    fn is_high(&mut self) -> bool {
        self.pin.is_high()
    }
}

impl PullControl for JumperPin<'_> {
    fn enable_pull_up(&mut self, enabled: bool) {
        self.pin
            .set_pull(if enabled { Pull::Up } else { Pull::None });
    }
}
