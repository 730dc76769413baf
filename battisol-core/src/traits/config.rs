//! Boot configuration source traits

/// Boot jumper position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Jumper {
    /// Fitted: isolator output open-drain, else open-source
    IsolatorOutput = 0,
    /// Fitted: ignition output open-drain, else open-source
    IgnitionOutput = 1,
    /// Fitted: kill switch normally closed, else normally open
    KillSwitch = 2,
    /// Fitted: relay over-current guard disabled
    RelayGuard = 3,
}

/// Trait for the boot configuration source
///
/// Values are latched once before the control loop starts and never
/// re-read.
pub trait ConfigSource {
    /// Read and hold all jumper values
    ///
    /// Calling it again after a successful latch has no effect.
    fn latch(&mut self);

    /// Check if a jumper is fitted, as of the last latch
    fn is_fitted(&self, jumper: Jumper) -> bool;
}
