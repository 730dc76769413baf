//! Board-agnostic control core for the battery isolator controller
//!
//! This crate contains all decision logic that does not depend on
//! specific hardware implementations:
//!
//! - Collaborator traits (half-bridge, switch input, voltage source, status)
//! - Debounced master/kill inputs
//! - Per-output protection engine and drive mapping
//! - Relay over-current guard
//! - System state machine and the top-level [`Controller`]
//! - Configuration types (boot jumpers and tuning tables)

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod input;
pub mod output;
pub mod safety;
pub mod state;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use controller::{Controller, Escalation, Hardware, OutputId, TickReport};
