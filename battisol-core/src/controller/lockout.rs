//! Lockout procedure

use super::{Controller, Signals};
use crate::state::{LockoutSeq, LockoutStep, SystemState};
use crate::traits::{HalfBridge, StatusMode, StatusSink, SwitchInput, VoltageSource};

impl<O, I, V, S> Controller<O, I, V, S>
where
    O: HalfBridge,
    I: SwitchInput,
    V: VoltageSource,
    S: StatusSink,
{
    /// Hold both outputs off until master has stayed released for the
    /// dwell time
    ///
    /// The slow indicator runs on its own timeout and goes dark early if
    /// that expires before the dwell does.
    pub(super) fn lockout(&mut self, mut seq: LockoutSeq, signals: Signals) -> SystemState {
        let timing = self.config.tuning.sequence;

        match seq.step {
            LockoutStep::Enter => {
                self.shut_outputs();
                self.kill.sleep(&mut self.hw.kill);
                self.hw
                    .status
                    .set_mode(StatusMode::Flashing(timing.lockout_flash_period));
                seq.led_timeout = timing.lockout_indicator_ticks;
                seq.timeout = timing.lockout_dwell_ticks;
                seq.step = LockoutStep::Dwell;
            }
            LockoutStep::Dwell => {
                if seq.led_timeout > 0 {
                    seq.led_timeout -= 1;
                } else {
                    self.hw.status.set_mode(StatusMode::Off);
                }

                if signals.master {
                    seq.timeout = timing.lockout_dwell_ticks;
                } else if seq.timeout > 0 {
                    seq.timeout -= 1;
                } else {
                    self.hw.status.set_mode(StatusMode::Off);
                    self.kill.sleep(&mut self.hw.kill);
                    // Next startup attempt begins with a clean episode count
                    self.isolator.clear_fault_history();
                    self.ignition.clear_fault_history();
                    return SystemState::Sleep;
                }
            }
        }

        SystemState::Lockout(seq)
    }
}
