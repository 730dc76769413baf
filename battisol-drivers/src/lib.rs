//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in battisol-core, written against the pin and ADC traits of
//! battisol-hal:
//!
//! - Half-bridge output stages (isolator, ignition)
//! - Switch inputs with a powered pull network (master, kill)
//! - Status LED
//! - ADC voltage monitor
//! - Boot jumper bank

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod input;
pub mod output;
pub mod sensor;
pub mod status;

#[cfg(test)]
pub(crate) mod mock;

pub use config::JumperBank;
pub use input::GpioSwitch;
pub use output::GpioHalfBridge;
pub use sensor::{AdcVoltageMonitor, ChannelMap};
pub use status::StatusLed;
