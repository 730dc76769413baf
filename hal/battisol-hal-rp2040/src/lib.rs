//! RP2040-specific HAL for the battery isolator controller
//!
//! This crate provides RP2040 implementations of the shared
//! `battisol-hal` traits on top of `embassy-rp`:
//!
//! - Blocking ADC over the four analog-capable GPIOs
//! - Hardware watchdog
//! - Jumper pins with a switchable internal pull-up
//!
//! Plain digital outputs and inputs need no wrapper here; `embassy-rp`
//! pins go through [`battisol_hal::EhOutput`] and [`battisol_hal::EhInput`].

#![no_std]

pub mod adc;
pub mod gpio;
pub mod watchdog;

pub use adc::RpAdc;
pub use gpio::JumperPin;
pub use watchdog::RpWatchdog;
