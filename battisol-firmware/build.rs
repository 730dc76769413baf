//! Build script for battisol-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Parses and validates controller.toml at compile time
//! - Generates the `TUNING` constant the firmware runs with

use std::env;
use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use battisol_core::config::{
    InputTiming, ProtectionLimits, RelayGuardLimits, SequenceTiming, Tuning,
};

fn main() {
    setup_linker();
    let tuning = load_tuning();
    generate_tuning(&tuning);
}

/// Set up linker search paths for memory.x
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    // Re-run if memory.x changes
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

/// Read controller.toml, falling back to defaults for missing keys
fn load_tuning() -> Tuning {
    println!("cargo:rerun-if-changed=controller.toml");

    let config_path = Path::new("controller.toml");

    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: controller.toml not found!                               ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a controller.toml tuning file.            ║\n\
            ║  Please create one in the battisol-firmware directory.           ║\n\
            ║  An empty file selects the default tuning.                       ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => {
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Failed to read controller.toml                           ║\n\
                ║                                                                  ║\n\
                ║  Error: {:<56} ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                e
            );
        }
    };

    let tuning: Tuning = match toml::from_str(&content) {
        Ok(tuning) => tuning,
        Err(e) => {
            let error_msg = e.to_string();
            panic!(
                "\n\
                ╔══════════════════════════════════════════════════════════════════╗\n\
                ║  ERROR: Invalid tuning in controller.toml                        ║\n\
                ╠══════════════════════════════════════════════════════════════════╣\n\
                ║                                                                  ║\n\
                {}\n\
                ║                                                                  ║\n\
                ╚══════════════════════════════════════════════════════════════════╝\n",
                format_error_lines(&error_msg)
            );
        }
    };

    if let Err(e) = tuning.validate() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: Rejected tuning in controller.toml                       ║\n\
            ╠══════════════════════════════════════════════════════════════════╣\n\
            {}\n\
            ╚══════════════════════════════════════════════════════════════════╝\n",
            format_error_lines(&describe(e))
        );
    }

    println!("cargo:warning=controller.toml validated successfully");
    tuning
}

/// Human-readable explanation of a validation error
fn describe(e: battisol_core::config::ConfigError) -> String {
    use battisol_core::config::ConfigError;

    match e {
        ConfigError::OcpDelayUnreachable(set) => format!(
            "{:?}: ocp delay of 255 can never be exceeded\nlower it or set the drop limit to 0",
            set
        ),
        ConfigError::VoltageWindowInverted(set) => {
            format!("{:?}: uvp_limit_mv must be below ovp_limit_mv", set)
        }
        ConfigError::DebounceUnreachable => {
            "[inputs] debounce of 255 never commits a change".to_string()
        }
        ConfigError::EscalationHoldTooLong => {
            "[sequence] escalation_hold_ticks must be 5 or less".to_string()
        }
        ConfigError::FlashPeriodTooShort => {
            "[sequence] flash periods must be at least 2 ticks".to_string()
        }
    }
}

/// Format error message lines with box drawing
fn format_error_lines(msg: &str) -> String {
    msg.lines()
        .map(|line| {
            let truncated = if line.len() > 64 {
                format!("{}...", &line[..61])
            } else {
                line.to_string()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Write `$OUT_DIR/tuning.rs`
fn generate_tuning(tuning: &Tuning) {
    let mut src = String::new();
    src.push_str("// Generated by build.rs from controller.toml\n\n");
    src.push_str("pub const TUNING: Tuning = Tuning {\n");
    write_protection(&mut src, "isolator", &tuning.isolator);
    write_protection(&mut src, "ignition", &tuning.ignition);
    write_relay_guard(&mut src, &tuning.relay_guard);
    write_inputs(&mut src, &tuning.inputs);
    write_sequence(&mut src, &tuning.sequence);
    src.push_str("};\n");

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    fs::write(out_dir.join("tuning.rs"), src).unwrap();
}

fn write_protection(src: &mut String, name: &str, p: &ProtectionLimits) {
    writeln!(src, "    {name}: ProtectionLimits {{").unwrap();
    writeln!(src, "        ovp_limit_mv: {},", p.ovp_limit_mv).unwrap();
    writeln!(src, "        uvp_limit_mv: {},", p.uvp_limit_mv).unwrap();
    writeln!(src, "        drop_limit_mv: {},", p.drop_limit_mv).unwrap();
    writeln!(src, "        ocp_delay: {},", p.ocp_delay).unwrap();
    writeln!(src, "        cooldown_ticks: {},", p.cooldown_ticks).unwrap();
    writeln!(src, "        deadtime_ticks: {},", p.deadtime_ticks).unwrap();
    writeln!(src, "        retry_timeout_ticks: {},", p.retry_timeout_ticks).unwrap();
    writeln!(src, "    }},").unwrap();
}

fn write_relay_guard(src: &mut String, r: &RelayGuardLimits) {
    writeln!(src, "    relay_guard: RelayGuardLimits {{").unwrap();
    writeln!(src, "        drop_limit_mv: {},", r.drop_limit_mv).unwrap();
    writeln!(src, "        delay: {},", r.delay).unwrap();
    writeln!(src, "        cooldown_ticks: {},", r.cooldown_ticks).unwrap();
    writeln!(src, "        deadtime_ticks: {},", r.deadtime_ticks).unwrap();
    writeln!(src, "    }},").unwrap();
}

fn write_inputs(src: &mut String, i: &InputTiming) {
    writeln!(src, "    inputs: InputTiming {{").unwrap();
    writeln!(src, "        master_debounce: {},", i.master_debounce).unwrap();
    writeln!(src, "        kill_debounce: {},", i.kill_debounce).unwrap();
    writeln!(src, "    }},").unwrap();
}

fn write_sequence(src: &mut String, s: &SequenceTiming) {
    let fields: [(&str, u32); 15] = [
        ("startup_settle_ticks", s.startup_settle_ticks.into()),
        ("isolator_check_ticks", s.isolator_check_ticks.into()),
        ("ignition_check_ticks", s.ignition_check_ticks.into()),
        ("kill_rundown_external_ticks", s.kill_rundown_external_ticks.into()),
        ("kill_rundown_master_ticks", s.kill_rundown_master_ticks.into()),
        ("alternator_active_mv", s.alternator_active_mv.into()),
        ("isolator_release_ticks", s.isolator_release_ticks.into()),
        ("lockout_dwell_ticks", s.lockout_dwell_ticks.into()),
        ("lockout_indicator_ticks", s.lockout_indicator_ticks.into()),
        ("kill_flash_period", s.kill_flash_period.into()),
        ("lockout_flash_period", s.lockout_flash_period.into()),
        ("ignition_fault_limit", s.ignition_fault_limit.into()),
        ("escalation_hold_ticks", s.escalation_hold_ticks.into()),
        ("boot_settle_samples", s.boot_settle_samples.into()),
        ("boot_gather_ticks", s.boot_gather_ticks.into()),
    ];

    writeln!(src, "    sequence: SequenceTiming {{").unwrap();
    for (name, value) in fields {
        writeln!(src, "        {name}: {value},").unwrap();
    }
    writeln!(src, "    }},").unwrap();
}
