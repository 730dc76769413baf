//! Top-level controller
//!
//! Owns every channel, the relay guard, the system state and the hardware
//! collaborators. The firmware calls [`Controller::boot`] once and then
//! [`Controller::tick`] at a fixed rate; each tick runs the whole pipeline
//! to completion:
//!
//! 1. refresh voltages and inputs
//! 2. run output protection and the relay guard
//! 3. escalate protection faults to a kill while active
//! 4. advance the state machine one step
//! 5. drive the output stages and the status indicator

mod kill;
mod lockout;
mod startup;


use crate::config::ControllerConfig;
use crate::input::InputChannel;
use crate::output::OutputChannel;
use crate::safety::RelayGuard;
use crate::state::{Phase, SystemState};
use crate::traits::{HalfBridge, StatusMode, StatusSink, SwitchInput, VoltageSource, Voltages};

/// Hardware collaborators driven by the controller
pub struct Hardware<O, I, V, S> {
    /// Isolator output stage
    pub isolator: O,
    /// Ignition output stage
    pub ignition: O,
    /// Master switch
    pub master: I,
    /// Kill switch
    pub kill: I,
    pub voltages: V,
    pub status: S,
}

/// Output channel selector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OutputId {
    Isolator,
    Ignition,
}

/// Reason for forcing a kill while active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Escalation {
    /// Isolator output protection fault
    IsolatorFault,
    /// Relay contact over-current
    RelayTrip,
    /// Too many ignition fault episodes
    IgnitionFaults,
}

/// Outcome of one control tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickReport {
    /// Phase after the tick
    pub phase: Phase,
    /// Escalation raised during the tick
    pub escalation: Option<Escalation>,
}

/// Switch states seen by the state procedures in one tick
#[derive(Debug, Clone, Copy)]
struct Signals {
    master: bool,
    kill: bool,
}

/// Battery isolator controller
pub struct Controller<O, I, V, S> {
    config: ControllerConfig,
    state: SystemState,
    isolator: OutputChannel,
    ignition: OutputChannel,
    master: InputChannel,
    kill: InputChannel,
    relay_guard: RelayGuard,
    /// Measurements of the current tick
    voltages: Voltages,
    /// Isolator logical state seen by the last gather
    isolator_on: bool,
    /// Isolator switched since the relay guard was last blanked
    isolator_switched: bool,
    /// Alternator side above the battery at the last gather
    alternator_active: bool,
    hw: Hardware<O, I, V, S>,
}

impl<O, I, V, S> Controller<O, I, V, S>
where
    O: HalfBridge,
    I: SwitchInput,
    V: VoltageSource,
    S: StatusSink,
{
    /// Create a controller; nothing is driven until [`boot`](Self::boot)
    pub fn new(config: ControllerConfig, hw: Hardware<O, I, V, S>) -> Self {
        let tuning = config.tuning;
        Self {
            state: SystemState::Sleep,
            isolator: OutputChannel::new(config.isolator_output, tuning.isolator),
            ignition: OutputChannel::new(config.ignition_output, tuning.ignition),
            master: InputChannel::new(config.master_input),
            kill: InputChannel::new(config.kill_input),
            relay_guard: RelayGuard::new(tuning.relay_guard),
            voltages: Voltages::default(),
            isolator_on: false,
            isolator_switched: false,
            alternator_active: false,
            config,
            hw,
        }
    }

    /// Bring the hardware to a known state and pick the initial phase
    ///
    /// A switch found active at power-up sends the system to lockout, so
    /// a master left on cannot start the vehicle without being cycled.
    pub fn boot(&mut self) -> Phase {
        self.hw.status.set_mode(StatusMode::Solid);
        self.hw.status.update();

        self.master.wake(&mut self.hw.master);
        self.kill.wake(&mut self.hw.kill);

        for out in [&mut self.isolator, &mut self.ignition] {
            out.reset();
            out.disable();
        }
        self.apply_outputs();

        // Longer than any debounce
        for _ in 0..self.config.tuning.sequence.boot_gather_ticks {
            self.gather();
        }

        self.state = if self.master.is_active() || self.kill.is_active() {
            SystemState::enter(Phase::Lockout)
        } else {
            SystemState::Sleep
        };

        self.kill.sleep(&mut self.hw.kill);
        self.hw.status.set_mode(StatusMode::Off);

        self.state.phase()
    }

    /// Run one control tick
    pub fn tick(&mut self) -> TickReport {
        self.gather();

        let v = self.voltages;
        self.isolator.protect(v.battery_mv, v.isolator_mv);
        self.ignition.protect(v.alternator_mv, v.ignition_mv);

        if self.isolator_switched {
            self.relay_guard.arm_deadtime();
            self.isolator_switched = false;
        }
        let relay_trip = self.relay_guard.update(self.isolator_on, v.relay_drop_mv());

        let mut signals = Signals {
            master: self.master.is_active(),
            kill: self.kill.is_active(),
        };

        let escalation = self.check_escalation(relay_trip);
        if escalation.is_some() {
            // Shut down at kill-switch speed, starting this tick
            self.state = SystemState::enter(Phase::Killing);
            signals.kill = true;
        }

        self.state = self.step(signals);

        self.apply_outputs();
        self.hw.status.update();

        TickReport {
            phase: self.state.phase(),
            escalation,
        }
    }

    /// Refresh measurements and inputs
    fn gather(&mut self) {
        self.voltages = self.hw.voltages.sample();

        self.master.poll(&mut self.hw.master);
        self.kill.poll(&mut self.hw.kill);

        let isolator_on = self.isolator.is_on();
        if isolator_on != self.isolator_on {
            self.isolator_switched = true;
        }
        self.isolator_on = isolator_on;

        self.alternator_active = self.voltages.alternator_charging();
    }

    fn check_escalation(&mut self, relay_trip: bool) -> Option<Escalation> {
        if self.state != SystemState::Active {
            return None;
        }

        let seq = &self.config.tuning.sequence;
        if self.isolator.has_fault() {
            self.isolator.delay_fault_execution(seq.escalation_hold_ticks);
            Some(Escalation::IsolatorFault)
        } else if relay_trip && self.config.relay_guard_enabled {
            Some(Escalation::RelayTrip)
        } else if self.ignition.fault_count() > seq.ignition_fault_limit {
            Some(Escalation::IgnitionFaults)
        } else {
            None
        }
    }

    fn step(&mut self, signals: Signals) -> SystemState {
        match self.state {
            SystemState::Sleep => {
                if signals.master {
                    SystemState::enter(Phase::Startup)
                } else {
                    SystemState::Sleep
                }
            }
            SystemState::Startup(seq) => self.startup(seq, signals),
            SystemState::Active => {
                if !signals.master || signals.kill {
                    SystemState::enter(Phase::Killing)
                } else {
                    SystemState::Active
                }
            }
            SystemState::Killing(seq) => self.kill_sequence(seq, signals),
            SystemState::Lockout(seq) => self.lockout(seq, signals),
        }
    }

    fn apply_outputs(&mut self) {
        self.ignition.apply(&mut self.hw.ignition);
        self.isolator.apply(&mut self.hw.isolator);
    }

    /// Turn both outputs off and disable them
    fn shut_outputs(&mut self) {
        for out in [&mut self.isolator, &mut self.ignition] {
            out.reset();
            out.disable();
        }
    }

    /// Current state, including procedure progress
    pub fn state(&self) -> SystemState {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    pub fn output(&self, id: OutputId) -> &OutputChannel {
        match id {
            OutputId::Isolator => &self.isolator,
            OutputId::Ignition => &self.ignition,
        }
    }

    pub fn output_mut(&mut self, id: OutputId) -> &mut OutputChannel {
        match id {
            OutputId::Isolator => &mut self.isolator,
            OutputId::Ignition => &mut self.ignition,
        }
    }

    pub fn master(&self) -> &InputChannel {
        &self.master
    }

    pub fn master_mut(&mut self) -> &mut InputChannel {
        &mut self.master
    }

    pub fn kill(&self) -> &InputChannel {
        &self.kill
    }

    pub fn kill_mut(&mut self) -> &mut InputChannel {
        &mut self.kill
    }

    pub fn relay_guard(&self) -> &RelayGuard {
        &self.relay_guard
    }

    /// Measurements of the last tick
    pub fn voltages(&self) -> Voltages {
        self.voltages
    }

    /// Check if the alternator was charging at the last measurement
    pub fn alternator_active(&self) -> bool {
        self.alternator_active
    }

    /// Assert an external fault on an output
    ///
    /// Only outputs configured to honour external faults react.
    pub fn set_external_fault(&mut self, id: OutputId) {
        self.output_mut(id).set_external_fault();
    }

    pub fn clear_external_fault(&mut self, id: OutputId) {
        self.output_mut(id).clear_external_fault();
    }

    pub fn hardware(&self) -> &Hardware<O, I, V, S> {
        &self.hw
    }

    pub fn hardware_mut(&mut self) -> &mut Hardware<O, I, V, S> {
        &mut self.hw
    }
}
