//! Site summary combining totals, transformer count, and land size.

use std::fmt;

use serde::Serialize;

use super::accounting::{compute_totals, format_currency, format_energy, required_support_count};
use super::types::{DeviceSelection, LayoutResult};

/// Headline figures for a planned site.
///
/// Derived from the same selection list as the layout so the transformer
/// count shown here always matches the transformers placed on the plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    /// Net energy after transformer consumption (MWh).
    pub total_energy: f64,
    /// Total price including transformers.
    pub total_cost: u64,
    /// Number of transformers required.
    pub transformers: usize,
    /// Land width used by the layout (ft).
    pub land_width_ft: u32,
    /// Land depth used by the layout (ft).
    pub land_depth_ft: u32,
}

impl SiteSummary {
    /// Builds the summary for `selections` and their computed `layout`.
    pub fn new(selections: &[DeviceSelection], layout: &LayoutResult) -> Self {
        let totals = compute_totals(selections);
        Self {
            total_energy: totals.energy,
            total_cost: totals.cost,
            transformers: required_support_count(selections),
            land_width_ft: layout.total_width,
            land_depth_ft: layout.total_depth,
        }
    }

    /// Land size as `"W x D ft"`.
    pub fn land_size(&self) -> String {
        format!("{} x {} ft", self.land_width_ft, self.land_depth_ft)
    }
}

impl fmt::Display for SiteSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Site Summary ---")?;
        writeln!(f, "Total Energy:   {}", format_energy(self.total_energy))?;
        writeln!(f, "Total Cost:     {}", format_currency(self.total_cost))?;
        writeln!(f, "Transformers:   {}", self.transformers)?;
        write!(f, "Land Size:      {}", self.land_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::layout::compute_layout;

    #[test]
    fn summary_of_two_megapacks() {
        let selections = [DeviceSelection::new("megapack", 2)];
        let layout = compute_layout(&selections);
        let summary = SiteSummary::new(&selections, &layout);

        assert_eq!(summary.total_cost, 110_000);
        assert_eq!(summary.total_energy, 3.5);
        assert_eq!(summary.transformers, 1);
        assert_eq!(summary.land_size(), "70 x 10 ft");
    }

    #[test]
    fn transformer_count_matches_placed_units() {
        let selections = [
            DeviceSelection::new("megapack-xl", 5),
            DeviceSelection::new("powerpack", 2),
        ];
        let layout = compute_layout(&selections);
        let summary = SiteSummary::new(&selections, &layout);
        let placed = layout
            .items
            .iter()
            .filter(|u| u.device_id == "transformer")
            .count();
        assert_eq!(summary.transformers, placed);
    }

    #[test]
    fn display_report() {
        let summary = SiteSummary::new(&[], &LayoutResult::default());
        let text = summary.to_string();
        assert!(text.contains("Total Energy:   0.0 MWh"));
        assert!(text.contains("Total Cost:     $0"));
        assert!(text.contains("Transformers:   0"));
        assert!(text.ends_with("Land Size:      0 x 0 ft"));
    }
}
