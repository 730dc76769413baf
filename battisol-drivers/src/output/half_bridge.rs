//! Discrete half-bridge on two gate pins
//!
//! Each output has a high-side and a low-side switch with separate,
//! active-high gate drives.

use battisol_core::traits::{DriveLevel, HalfBridge};
use battisol_hal::OutputPin;

/// Half-bridge driven by two GPIO pins
pub struct GpioHalfBridge<H, L> {
    high_side: H,
    low_side: L,
}

impl<H: OutputPin, L: OutputPin> GpioHalfBridge<H, L> {
    /// Create a half-bridge with both switches off
    pub fn new(high_side: H, low_side: L) -> Self {
        let mut bridge = Self {
            high_side,
            low_side,
        };
        bridge.set_level(DriveLevel::HiZ);
        bridge
    }

    /// Release the gate pins
    pub fn release(self) -> (H, L) {
        (self.high_side, self.low_side)
    }
}

impl<H: OutputPin, L: OutputPin> HalfBridge for GpioHalfBridge<H, L> {
    /// Switch off before switching on, so both sides never conduct at once
    fn set_level(&mut self, level: DriveLevel) {
        match level {
            DriveLevel::High => {
                self.low_side.set_low();
                self.high_side.set_high();
            }
            DriveLevel::Low => {
                self.high_side.set_low();
                self.low_side.set_high();
            }
            DriveLevel::HiZ => {
                self.high_side.set_low();
                self.low_side.set_low();
            }
        }
    }
}
