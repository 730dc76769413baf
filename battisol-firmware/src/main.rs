//! Battisol - Battery Isolator Controller Firmware
//!
//! Main firmware binary for RP2040-based isolator controllers. Ties the
//! starter battery to the vehicle system through the isolator relay and
//! switches the ignition, under control of a master and a kill switch.
//!
//! Boot order matters: the analog inputs settle before anything is
//! decided, the jumpers are latched exactly once, and the controller has
//! brought every output to a safe level before the control task starts.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use {defmt_rtt as _, panic_probe as _};

use battisol_core::config::{BootstrapConfig, ControllerConfig};
use battisol_core::traits::VoltageSource;
use battisol_core::Controller;
use battisol_hal::Watchdog;

mod board;
mod config;
mod tasks;

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Battisol firmware starting...");

    let p = embassy_rp::init(Default::default());
    let mut board = board::Board::new(p);
    info!("Peripherals initialized");

    let watchdog = if cfg!(feature = "watchdog") {
        board.watchdog.start(tasks::WATCHDOG_TIMEOUT_MS);
        info!("Watchdog started ({} ms)", tasks::WATCHDOG_TIMEOUT_MS);
        Some(board.watchdog)
    } else {
        None
    };

    let tuning = config::tuning();

    // Divider capacitors charge before the jumpers are trusted
    for _ in 0..tuning.sequence.boot_settle_samples {
        board.hardware.voltages.measure();
    }

    let bootstrap = BootstrapConfig::read(&mut board.jumpers);
    info!("Jumpers latched: {=u8:04b}", board.jumpers.mask());
    info!(
        "Isolator {}, ignition {}",
        bootstrap.isolator_output.topology, bootstrap.ignition_output.topology
    );
    info!(
        "Kill switch active {}, relay guard {}",
        bootstrap.kill_active_level,
        if bootstrap.relay_guard_enabled { "enabled" } else { "disabled" }
    );

    let config = ControllerConfig::new(tuning, bootstrap);
    let mut controller = Controller::new(config, board.hardware);

    let phase = controller.boot();
    info!("Boot complete, initial phase {}", phase);

    spawner
        .spawn(tasks::control_task(controller, watchdog))
        .unwrap();

    info!("Control task spawned, firmware running");
}
