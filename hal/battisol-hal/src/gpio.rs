//! GPIO pin abstractions
//!
//! Provides traits for digital input and output pins that can be implemented
//! by chip-specific HALs, plus adapters for `embedded-hal` 1.0 pins.

use core::convert::Infallible;

use embedded_hal::digital;

/// Digital output pin
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip.
pub trait OutputPin {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Toggle the pin state
    fn toggle(&mut self) {
        if self.is_set_high() {
            self.set_low();
        } else {
            self.set_high();
        }
    }

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&mut self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&mut self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }
}

/// Input pin with a switchable internal pull-up
///
/// Used for jumpers that only need their pull-up while being read.
pub trait PullControl {
    /// Enable or disable the pull-up
    fn enable_pull_up(&mut self, enabled: bool);
}

fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// [`OutputPin`] over an `embedded-hal` output pin that cannot fail
pub struct EhOutput<P>(pub P);

impl<P> OutputPin for EhOutput<P>
where
    P: digital::StatefulOutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        infallible(self.0.set_high());
    }

    fn set_low(&mut self) {
        infallible(self.0.set_low());
    }

    fn toggle(&mut self) {
        infallible(self.0.toggle());
    }

    fn is_set_high(&mut self) -> bool {
        infallible(self.0.is_set_high())
    }
}

/// [`InputPin`] over an `embedded-hal` input pin that cannot fail
pub struct EhInput<P>(pub P);

impl<P> InputPin for EhInput<P>
where
    P: digital::InputPin<Error = Infallible>,
{
    fn is_high(&mut self) -> bool {
        infallible(self.0.is_high())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// `embedded-hal` pin whose output drives its own input
    struct LoopbackPin {
        high: bool,
    }

    impl digital::ErrorType for LoopbackPin {
        type Error = Infallible;
    }

    impl digital::OutputPin for LoopbackPin {
        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }
    }

    impl digital::StatefulOutputPin for LoopbackPin {
        fn is_set_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_set_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    impl digital::InputPin for LoopbackPin {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    #[test]
    fn test_output_adapter() {
        let mut pin = EhOutput(LoopbackPin { high: false });

        pin.set_high();
        assert!(pin.is_set_high());

        pin.toggle();
        assert!(pin.is_set_low());

        pin.set_state(true);
        assert!(pin.0.high);
    }

    #[test]
    fn test_input_adapter() {
        let mut pin = EhInput(LoopbackPin { high: true });
        assert!(pin.is_high());

        pin.0.high = false;
        assert!(pin.is_low());
    }
}
