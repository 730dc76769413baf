//! Status indicator drivers

pub mod led;

pub use led::StatusLed;
