//! Output protection
//!
//! Turns measured voltages into latched fault verdicts:
//! - [`LeakyBucket`]: saturating over-current integrator with dead-time
//! - [`Protection`]: per-output OVP/UVP/OCP engine with cooldown and retry
//! - [`RelayGuard`]: independent bucket over the isolator relay contacts

pub mod bucket;
pub mod protection;
pub mod relay_guard;

pub use bucket::LeakyBucket;
pub use protection::Protection;
pub use relay_guard::RelayGuard;
