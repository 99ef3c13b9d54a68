//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use site_planner::site::types::DeviceSelection;

/// Builds a selection list from `(device_id, quantity)` pairs.
pub fn selections(entries: &[(&str, u32)]) -> Vec<DeviceSelection> {
    entries
        .iter()
        .map(|&(id, quantity)| DeviceSelection::new(id, quantity))
        .collect()
}

/// One unit of every selectable device.
pub fn one_of_each() -> Vec<DeviceSelection> {
    selections(&[
        ("megapack-xl", 1),
        ("megapack-2", 1),
        ("megapack", 1),
        ("powerpack", 1),
    ])
}

/// A spread of inputs covering empty, small, odd, mixed, and multi-row sites.
pub fn sample_sites() -> Vec<Vec<DeviceSelection>> {
    vec![
        Vec::new(),
        selections(&[("powerpack", 1)]),
        selections(&[("megapack", 3)]),
        one_of_each(),
        selections(&[("megapack-xl", 7), ("powerpack", 3)]),
        selections(&[("megapack-2", 5), ("megapack", 2), ("powerpack", 9)]),
        selections(&[("megapack-xl", 40), ("megapack-2", 40)]),
        selections(&[("powerpack", 2), ("bogus", 4), ("powerpack", 3)]),
    ]
}

/// Path to a bundled sample site file.
pub fn site_file(name: &str) -> String {
    format!("{}/sites/{name}", env!("CARGO_MANIFEST_DIR"))
}
