//! Switch input traits

/// Pull network applied to a switch input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// Pull network unpowered
    #[default]
    None,
    /// Pulled towards the supply
    Up,
    /// Pulled towards ground
    Down,
}

/// Trait for a physical switch input with a switchable pull network
///
/// The pull network is powered separately so it can be switched off while
/// the input is asleep.
pub trait SwitchInput {
    /// Sample the raw electrical level (true = high)
    ///
    /// Takes `&mut self` because pin reads may require mutable access.
    fn read_level(&mut self) -> bool;

    /// Configure the pull network
    fn set_pull(&mut self, pull: Pull);
}
