//! System state machine
//!
//! The controller is always in exactly one [`SystemState`]. States that run
//! a multi-step procedure carry their own step and timeout, so nothing
//! leaks from one visit of a state into the next.

pub mod machine;

pub use machine::{
    KillSeq, KillStep, LockoutSeq, LockoutStep, Phase, StartupSeq, StartupStep, SystemState,
};
