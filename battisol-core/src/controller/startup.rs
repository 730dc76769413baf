//! Startup procedure
//!
//! Brings the isolator up first and the ignition second, watching each for
//! faults before moving on. Releasing master or pressing kill at any step
//! aborts to lockout with both outputs shut.

use super::{Controller, Signals};
use crate::state::{Phase, StartupSeq, StartupStep, SystemState};
use crate::traits::{HalfBridge, StatusMode, StatusSink, SwitchInput, VoltageSource};

impl<O, I, V, S> Controller<O, I, V, S>
where
    O: HalfBridge,
    I: SwitchInput,
    V: VoltageSource,
    S: StatusSink,
{
    pub(super) fn startup(&mut self, mut seq: StartupSeq, signals: Signals) -> SystemState {
        if !signals.master || signals.kill {
            return self.abort_startup();
        }

        let timing = self.config.tuning.sequence;

        match seq.step {
            StartupStep::Wake => {
                self.kill.wake(&mut self.hw.kill);
                self.hw.status.set_mode(StatusMode::Solid);
                seq.timeout = timing.startup_settle_ticks;
                seq.step = StartupStep::Settle;
            }
            StartupStep::Settle => {
                if seq.timeout > 0 {
                    seq.timeout -= 1;
                } else {
                    seq.step = StartupStep::EnableIsolator;
                }
            }
            StartupStep::EnableIsolator => {
                self.isolator.enable();
                self.isolator.set();
                seq.timeout = timing.isolator_check_ticks;
                seq.step = StartupStep::CheckIsolator;
            }
            StartupStep::CheckIsolator => {
                if self.isolator.has_fault() {
                    return self.abort_startup();
                }

                if seq.timeout > 0 {
                    seq.timeout -= 1;
                } else {
                    self.ignition.enable();
                    self.ignition.set();
                    seq.timeout = timing.ignition_check_ticks;
                    seq.step = StartupStep::CheckIgnition;
                }
            }
            StartupStep::CheckIgnition => {
                if self.isolator.has_fault() || self.ignition.has_fault() {
                    return self.abort_startup();
                }

                if seq.timeout > 0 {
                    seq.timeout -= 1;
                } else {
                    return SystemState::Active;
                }
            }
        }

        SystemState::Startup(seq)
    }

    fn abort_startup(&mut self) -> SystemState {
        self.shut_outputs();
        SystemState::enter(Phase::Lockout)
    }
}
