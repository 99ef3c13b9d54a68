//! Derived totals: transformer count, cost, and net energy.
//!
//! Unknown device ids contribute zero to every total. Duplicate entries for
//! the same id are summed independently, never merged or overridden.

use tracing::debug;

use super::types::{DeviceSelection, Totals};
use crate::catalog::{self, TRANSFORMER};

/// Number of batteries served by one transformer.
pub const BATTERIES_PER_TRANSFORMER: u64 = 2;

/// Transformers required for the selected batteries: `ceil(batteries / 2)`.
///
/// Only selectable devices count as batteries; transformer ids and unknown
/// ids contribute nothing.
///
/// # Examples
///
/// ```
/// use site_planner::site::accounting::required_support_count;
/// use site_planner::site::types::DeviceSelection;
///
/// assert_eq!(required_support_count(&[DeviceSelection::new("megapack", 3)]), 2);
/// ```
pub fn required_support_count(selections: &[DeviceSelection]) -> usize {
    let batteries: u64 = selections
        .iter()
        .filter(|s| catalog::lookup_selectable(&s.device_id).is_some())
        .map(|s| u64::from(s.quantity))
        .sum();
    batteries.div_ceil(BATTERIES_PER_TRANSFORMER) as usize
}

/// Total price of all resolvable selections plus the derived transformers.
pub fn total_cost(selections: &[DeviceSelection]) -> u64 {
    let devices: u64 = selections
        .iter()
        .map(|s| catalog::lookup(&s.device_id).map_or(0, |d| d.cost * u64::from(s.quantity)))
        .sum();
    devices + TRANSFORMER.cost * required_support_count(selections) as u64
}

/// Net energy (MWh): battery yield minus transformer consumption.
pub fn total_energy(selections: &[DeviceSelection]) -> f64 {
    let devices: f64 = selections
        .iter()
        .map(|s| catalog::lookup(&s.device_id).map_or(0.0, |d| d.energy * f64::from(s.quantity)))
        .fold(0.0, |acc, e| acc + e);
    devices + TRANSFORMER.energy * required_support_count(selections) as f64
}

/// Cost and energy together.
pub fn compute_totals(selections: &[DeviceSelection]) -> Totals {
    let totals = Totals {
        cost: total_cost(selections),
        energy: total_energy(selections),
    };
    debug!(cost = totals.cost, energy = totals.energy, "computed site totals");
    totals
}

/// Formats an amount as `$` plus a comma-grouped integer, e.g. `$110,000`.
pub fn format_currency(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    grouped.push('$');
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}

/// Formats energy with one decimal and a unit suffix, e.g. `3.5 MWh`.
pub fn format_energy(mwh: f64) -> String {
    format!("{mwh:.1} MWh")
}
