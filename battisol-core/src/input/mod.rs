//! Debounced switch inputs
//!
//! Converts raw switch levels into stable active/inactive states.
//! Debouncing is by persistence: a new level must be seen on consecutive
//! samples, so the filter tolerates a variable tick rate.

pub mod channel;

pub use channel::InputChannel;
