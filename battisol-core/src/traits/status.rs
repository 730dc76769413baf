//! Status indicator traits

/// Indicator pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusMode {
    /// Indicator dark
    #[default]
    Off,
    /// Indicator lit continuously
    Solid,
    /// Indicator blinking with the given full period in ticks
    Flashing(u16),
}

/// Trait for the status indicator
pub trait StatusSink {
    /// Select the indicator pattern
    ///
    /// Re-selecting the current flashing pattern must not restart its phase.
    fn set_mode(&mut self, mode: StatusMode);

    /// Advance the indicator by one tick
    fn update(&mut self);
}
