//! Logical state to drive level mapping

use crate::config::{OutputConfig, Topology};
use crate::traits::DriveLevel;

/// Map a logical output state onto the drive level of an output stage
///
/// | topology  | on   | off  |
/// |-----------|------|------|
/// | push-pull | High | Low  |
/// | inverted  | Low  | High |
/// | open-drain| Low  | HiZ  |
/// | open-src  | High | HiZ  |
/// | disabled  | HiZ  | HiZ  |
///
/// Inversion only applies to push-pull stages.
pub fn map_level(config: &OutputConfig, on: bool) -> DriveLevel {
    match config.topology {
        Topology::PushPull => {
            if on != config.inverted {
                DriveLevel::High
            } else {
                DriveLevel::Low
            }
        }
        Topology::OpenDrain if on => DriveLevel::Low,
        Topology::OpenSource if on => DriveLevel::High,
        _ => DriveLevel::HiZ,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn config(topology: Topology, inverted: bool) -> OutputConfig {
        OutputConfig {
            topology,
            inverted,
            ext_fault_enabled: false,
        }
    }

    #[test]
    fn test_mapping_table() {
        let cases = [
            (Topology::PushPull, false, DriveLevel::High, DriveLevel::Low),
            (Topology::PushPull, true, DriveLevel::Low, DriveLevel::High),
            (Topology::OpenDrain, false, DriveLevel::Low, DriveLevel::HiZ),
            (Topology::OpenSource, false, DriveLevel::High, DriveLevel::HiZ),
            (Topology::Disabled, false, DriveLevel::HiZ, DriveLevel::HiZ),
        ];

        for (topology, inverted, on, off) in cases {
            let cfg = config(topology, inverted);
            assert_eq!(map_level(&cfg, true), on);
            assert_eq!(map_level(&cfg, false), off);
        }
    }

    #[test]
    fn test_inversion_ignored_without_push_pull() {
        assert_eq!(
            map_level(&config(Topology::OpenDrain, true), true),
            DriveLevel::Low
        );
        assert_eq!(
            map_level(&config(Topology::OpenSource, true), false),
            DriveLevel::HiZ
        );
    }

    fn topology() -> impl Strategy<Value = Topology> {
        prop_oneof![
            Just(Topology::OpenDrain),
            Just(Topology::OpenSource),
            Just(Topology::PushPull),
            Just(Topology::Disabled),
        ]
    }

    proptest! {
        #[test]
        fn mapping_is_stable(topology in topology(), inverted: bool, on: bool, repeats in 1usize..8) {
            let cfg = config(topology, inverted);
            let first = map_level(&cfg, on);
            for _ in 0..repeats {
                prop_assert_eq!(map_level(&cfg, on), first);
            }
        }
    }
}
