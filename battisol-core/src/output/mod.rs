//! Output channels
//!
//! Each output owns its commanded state, its protection engine and the
//! mapping from logical on/off to the drive level of its output stage.

pub mod channel;
pub mod drive;

pub use channel::OutputChannel;
pub use drive::map_level;

/// Longest hold [`OutputChannel::delay_fault_execution`] accepts, in ticks
pub const MAX_FAULT_EXEC_DELAY: u8 = 5;
