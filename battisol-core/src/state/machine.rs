//! State definitions
//!
//! The per-tick procedures that advance these states live with the
//! [`Controller`](crate::Controller); this module only describes where the
//! system is.

/// Startup procedure steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StartupStep {
    /// Wake the kill input and indicate startup
    #[default]
    Wake,
    /// Let the kill input settle
    Settle,
    /// Turn the isolator on
    EnableIsolator,
    /// Observe the isolator, then turn ignition on
    CheckIsolator,
    /// Observe both outputs, then go active
    CheckIgnition,
}

/// Startup procedure progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StartupSeq {
    pub step: StartupStep,
    pub timeout: u16,
}

/// Kill procedure steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KillStep {
    /// Turn ignition off and start the fast indicator
    #[default]
    IgnitionOff,
    /// Wait for the alternator to stop charging
    Rundown,
    /// Turn the isolator off
    IsolatorOff,
    /// Let the relay release, then disable both outputs
    Release,
}

/// Kill procedure progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KillSeq {
    pub step: KillStep,
    pub timeout: u16,
}

/// Lockout procedure steps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LockoutStep {
    /// Force outputs off and start the slow indicator
    #[default]
    Enter,
    /// Wait for master to stay released for the dwell time
    Dwell,
}

/// Lockout procedure progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LockoutSeq {
    pub step: LockoutStep,
    /// Remaining dwell
    pub timeout: u16,
    /// Remaining indicator time
    pub led_timeout: u16,
}

/// System states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemState {
    /// Idle; waiting for the master switch
    #[default]
    Sleep,
    /// Bringing the outputs up one at a time
    Startup(StartupSeq),
    /// Both outputs on
    Active,
    /// Orderly shutdown of both outputs
    Killing(KillSeq),
    /// Outputs held off until master has been released long enough
    Lockout(LockoutSeq),
}

impl SystemState {
    /// Enter a state at the first step of its procedure
    pub fn enter(phase: Phase) -> Self {
        match phase {
            Phase::Sleep => SystemState::Sleep,
            Phase::Startup => SystemState::Startup(StartupSeq::default()),
            Phase::Active => SystemState::Active,
            Phase::Killing => SystemState::Killing(KillSeq::default()),
            Phase::Lockout => SystemState::Lockout(LockoutSeq::default()),
        }
    }

    /// Phase of this state, without procedure progress
    pub fn phase(&self) -> Phase {
        match self {
            SystemState::Sleep => Phase::Sleep,
            SystemState::Startup(_) => Phase::Startup,
            SystemState::Active => Phase::Active,
            SystemState::Killing(_) => Phase::Killing,
            SystemState::Lockout(_) => Phase::Lockout,
        }
    }
}

/// System phase with a stable numeric code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Phase {
    Sleep = 0,
    Startup = 1,
    Active = 2,
    Killing = 3,
    Lockout = 4,
}

impl Phase {
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl From<u8> for Phase {
    /// Unknown codes fall back to [`Phase::Killing`]
    fn from(code: u8) -> Self {
        match code {
            0 => Phase::Sleep,
            1 => Phase::Startup,
            2 => Phase::Active,
            4 => Phase::Lockout,
            _ => Phase::Killing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_starts_at_first_step() {
        assert_eq!(
            SystemState::enter(Phase::Startup),
            SystemState::Startup(StartupSeq {
                step: StartupStep::Wake,
                timeout: 0
            })
        );
        assert_eq!(
            SystemState::enter(Phase::Killing),
            SystemState::Killing(KillSeq {
                step: KillStep::IgnitionOff,
                timeout: 0
            })
        );
        assert_eq!(
            SystemState::enter(Phase::Lockout),
            SystemState::Lockout(LockoutSeq::default())
        );
    }

    #[test]
    fn test_phase_round_trip() {
        for phase in [
            Phase::Sleep,
            Phase::Startup,
            Phase::Active,
            Phase::Killing,
            Phase::Lockout,
        ] {
            assert_eq!(SystemState::enter(phase).phase(), phase);
            assert_eq!(Phase::from(phase.code()), phase);
        }
    }

    #[test]
    fn test_unknown_code_fails_safe() {
        assert_eq!(Phase::from(5), Phase::Killing);
        assert_eq!(Phase::from(0xFF), Phase::Killing);
    }
}
