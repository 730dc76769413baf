//! Control loop task
//!
//! Runs one controller tick per ticker period and turns the tick outcome
//! into log output:
//! - phase transitions and escalations
//! - debounced switch edges
//! - alternator charge start and stop
//! - protection retries
//! - voltage conversion failures

use battisol_core::state::Phase;
use battisol_core::OutputId;
use battisol_hal::Watchdog;
use battisol_hal_rp2040::RpWatchdog;
use defmt::*;
use embassy_time::{Duration, Ticker};

use crate::board::BoardController;

/// Control tick interval in milliseconds
pub const TICK_INTERVAL_MS: u64 = 1;

/// Watchdog period; many ticks may be missed before a reset
pub const WATCHDOG_TIMEOUT_MS: u32 = 500;

/// Control task - owns the controller for the life of the firmware
#[embassy_executor::task]
pub async fn control_task(mut controller: BoardController, mut watchdog: Option<RpWatchdog>) {
    info!("Control task started in {}", controller.phase());

    let mut ticker = Ticker::every(Duration::from_millis(TICK_INTERVAL_MS));
    let mut phase = controller.phase();
    let mut adc_errors = 0;
    let mut charging = controller.alternator_active();

    loop {
        ticker.next().await;

        let report = controller.tick();

        if let Some(reason) = report.escalation {
            warn!("Escalation: {}", reason);
        }
        if report.phase != phase {
            log_transition(phase, report.phase);
            phase = report.phase;
        }

        log_input_edges(&mut controller);
        log_retries(&mut controller);

        if controller.alternator_active() != charging {
            charging = controller.alternator_active();
            debug!("Alternator {}", if charging { "charging" } else { "idle" });
        }

        let monitor = &controller.hardware().voltages;
        if monitor.error_count() != adc_errors {
            adc_errors = monitor.error_count();
            if let Some(e) = monitor.last_error() {
                warn!("Voltage conversion failed: {} ({} total)", e, adc_errors);
            }
        }

        if let Some(wd) = watchdog.as_mut() {
            wd.feed();
        }
    }
}

fn log_transition(from: Phase, to: Phase) {
    match to {
        Phase::Killing | Phase::Lockout => warn!("Phase {} -> {}", from, to),
        _ => info!("Phase {} -> {}", from, to),
    }
}

fn log_input_edges(controller: &mut BoardController) {
    let master = controller.master_mut();
    if master.changed() {
        info!("Master switch {}", if master.is_active() { "on" } else { "off" });
        master.clear_changed();
    }

    let kill = controller.kill_mut();
    if kill.changed() {
        info!("Kill switch {}", if kill.is_active() { "on" } else { "off" });
        kill.clear_changed();
    }
}

fn log_retries(controller: &mut BoardController) {
    for id in [OutputId::Isolator, OutputId::Ignition] {
        let out = controller.output_mut(id);
        if out.retry_flag() {
            warn!(
                "{} protection released, episode {}",
                id,
                out.fault_count()
            );
            out.clear_retry_flag();
        }
    }
}
