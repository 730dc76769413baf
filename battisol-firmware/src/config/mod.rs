//! Build-time tuning
//!
//! `build.rs` turns controller.toml into the `TUNING` constant included
//! below. The build already refuses an invalid table; the check is
//! repeated here so a stale or hand-edited output can never reach the
//! controller.

use battisol_core::config::{
    InputTiming, ProtectionLimits, RelayGuardLimits, SequenceTiming, Tuning,
};
use defmt::*;

include!(concat!(env!("OUT_DIR"), "/tuning.rs"));

/// Tuning the controller runs with
pub fn tuning() -> Tuning {
    match TUNING.validate() {
        Ok(()) => TUNING,
        Err(e) => {
            error!("Built-in tuning rejected ({}), falling back to defaults", e);
            Tuning::default()
        }
    }
}
