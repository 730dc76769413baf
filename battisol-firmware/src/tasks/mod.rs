//! Embassy async tasks
//!
//! The whole control pipeline runs in a single task; there is nothing to
//! share between tasks.

pub mod control;

pub use control::{control_task, WATCHDOG_TIMEOUT_MS};
