//! Kill procedure
//!
//! Ignition goes off first. The isolator follows once the alternator has
//! run down or the rundown allowance has expired, so the alternator is
//! never cut off from the battery while still charging.

use super::{Controller, Signals};
use crate::state::{KillSeq, KillStep, Phase, SystemState};
use crate::traits::{HalfBridge, StatusMode, StatusSink, SwitchInput, VoltageSource};

impl<O, I, V, S> Controller<O, I, V, S>
where
    O: HalfBridge,
    I: SwitchInput,
    V: VoltageSource,
    S: StatusSink,
{
    pub(super) fn kill_sequence(&mut self, mut seq: KillSeq, signals: Signals) -> SystemState {
        let timing = self.config.tuning.sequence;

        match seq.step {
            KillStep::IgnitionOff => {
                self.hw
                    .status
                    .set_mode(StatusMode::Flashing(timing.kill_flash_period));
                self.ignition.reset();
                seq.timeout = if signals.kill {
                    timing.kill_rundown_external_ticks
                } else {
                    timing.kill_rundown_master_ticks
                };
                seq.step = KillStep::Rundown;
            }
            KillStep::Rundown => {
                if self.voltages.alternator_mv < timing.alternator_active_mv {
                    seq.step = KillStep::IsolatorOff;
                }

                // Kill pressed mid-rundown only ever shortens the wait
                if signals.kill && seq.timeout > timing.kill_rundown_external_ticks {
                    seq.timeout = timing.kill_rundown_external_ticks;
                }

                if seq.timeout > 0 {
                    seq.timeout -= 1;
                } else {
                    seq.step = KillStep::IsolatorOff;
                }
            }
            KillStep::IsolatorOff => {
                self.isolator.reset();
                seq.timeout = timing.isolator_release_ticks;
                seq.step = KillStep::Release;
            }
            KillStep::Release => {
                if seq.timeout > 0 {
                    seq.timeout -= 1;
                } else {
                    self.isolator.disable();
                    self.ignition.disable();
                    return SystemState::enter(Phase::Lockout);
                }
            }
        }

        SystemState::Killing(seq)
    }
}
