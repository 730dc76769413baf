//! Hardware collaborator traits
//!
//! These traits define the interface between the control core and the
//! board-specific drivers. Everything the core needs from the outside world
//! (driving an output stage, sampling a switch, reading voltages, showing
//! status, reading boot jumpers) goes through one of them, so the control
//! logic runs unchanged against software fakes on a host.

pub mod config;
pub mod input;
pub mod output;
pub mod status;
pub mod voltage;

pub use config::{ConfigSource, Jumper};
pub use input::{Pull, SwitchInput};
pub use output::{DriveLevel, HalfBridge};
pub use status::{StatusMode, StatusSink};
pub use voltage::{VoltageChannel, VoltageSource, Voltages};
