//! Boot configuration drivers

pub mod jumpers;

pub use jumpers::JumperBank;
