//! Sensor drivers

pub mod voltage;

pub use voltage::{AdcVoltageMonitor, ChannelMap};
