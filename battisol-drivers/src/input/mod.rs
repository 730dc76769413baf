//! Switch input drivers

pub mod switch;

pub use switch::GpioSwitch;
