//! Output stage traits

/// Physical level asserted by a half-bridge output stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveLevel {
    /// Both switches off, output floating
    #[default]
    HiZ,
    /// Low-side switch on, output pulled to ground
    Low,
    /// High-side switch on, output pulled to the supply
    High,
}

/// Trait for a half-bridge output stage
///
/// Implementations must never turn both switches on at once. Switching
/// between `High` and `Low` must release the conducting side first.
pub trait HalfBridge {
    /// Assert the given level on the output
    fn set_level(&mut self, level: DriveLevel);
}
