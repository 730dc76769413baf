//! Battisol Hardware Abstraction Layer
//!
//! This crate defines hardware abstraction traits that can be implemented
//! by chip-specific HALs. The drivers in `battisol-drivers` are written
//! against these traits only, so the same driver code runs on any chip
//! and against mock pins on a host.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  battisol-firmware                      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  battisol-drivers (core trait impls)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  battisol-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ battisol-hal- │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`], [`gpio::PullControl`] - Digital I/O
//! - [`adc::AdcReader`] - Blocking analog conversions
//! - [`watchdog::Watchdog`] - Reset watchdog

#![no_std]
#![deny(unsafe_code)]

pub mod adc;
pub mod gpio;
pub mod watchdog;

// Re-export key traits at crate root for convenience
pub use adc::{AdcError, AdcReader};
pub use gpio::{EhInput, EhOutput, InputPin, OutputPin, PullControl};
pub use watchdog::Watchdog;
