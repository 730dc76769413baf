//! Output stage drivers

pub mod half_bridge;

pub use half_bridge::GpioHalfBridge;
