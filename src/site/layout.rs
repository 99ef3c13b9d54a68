//! Deterministic row packing of batteries and their transformers.
//!
//! The engine runs in three passes:
//!
//! 1. expand each resolvable selection into individual units, in order;
//! 2. insert one transformer after every second battery until the required
//!    count is reached, appending any remainder at the end;
//! 3. fill rows left to right, wrapping to a new row only when the next unit
//!    would cross [`SITE_MAX_WIDTH_FT`] and the cursor is not at a row start.

use tracing::debug;

use super::accounting::{BATTERIES_PER_TRANSFORMER, required_support_count};
use super::types::{DeviceSelection, LayoutResult, PlacedUnit};
use crate::catalog::{self, DeviceSpec, ROW_DEPTH_FT, SITE_MAX_WIDTH_FT, TRANSFORMER};

/// Computes the floor plan for a selection list.
///
/// Unknown device ids are skipped. The result depends only on `selections`.
///
/// # Examples
///
/// ```
/// use site_planner::site::layout::compute_layout;
/// use site_planner::site::types::DeviceSelection;
///
/// let layout = compute_layout(&[DeviceSelection::new("powerpack", 1)]);
/// let ids: Vec<&str> = layout.items.iter().map(|u| u.device_id.as_str()).collect();
/// assert_eq!(ids, ["powerpack", "transformer"]);
/// ```
pub fn compute_layout(selections: &[DeviceSelection]) -> LayoutResult {
    let batteries = expand(selections);
    let sequence = interleave(&batteries, required_support_count(selections));
    let result = pack_rows(&sequence);
    debug!(
        units = result.items.len(),
        width_ft = result.total_width,
        depth_ft = result.total_depth,
        "computed site layout"
    );
    result
}

/// One spec per physical unit, preserving selection and quantity order.
fn expand(selections: &[DeviceSelection]) -> Vec<&'static DeviceSpec> {
    selections
        .iter()
        .filter_map(|s| catalog::lookup(&s.device_id).map(|spec| (spec, s.quantity)))
        .flat_map(|(spec, quantity)| std::iter::repeat_n(spec, quantity as usize))
        .collect()
}

fn interleave(
    batteries: &[&'static DeviceSpec],
    transformers: usize,
) -> Vec<&'static DeviceSpec> {
    let mut sequence = Vec::with_capacity(batteries.len() + transformers);
    let mut placed = 0;
    let cadence = BATTERIES_PER_TRANSFORMER as usize;

    for (i, &battery) in batteries.iter().enumerate() {
        sequence.push(battery);
        if (i + 1) % cadence == 0 && placed < transformers {
            sequence.push(&TRANSFORMER);
            placed += 1;
        }
    }

    // Odd battery counts leave transformers that never met the cadence.
    sequence.extend(std::iter::repeat_n(&TRANSFORMER, transformers - placed));
    sequence
}

fn pack_rows(sequence: &[&'static DeviceSpec]) -> LayoutResult {
    let mut items = Vec::with_capacity(sequence.len());
    let mut cursor_x = 0;
    let mut cursor_y = 0;
    let mut max_right = 0;

    for spec in sequence {
        // A unit wider than the site still lands at x = 0 rather than looping.
        if cursor_x + spec.width > SITE_MAX_WIDTH_FT && cursor_x > 0 {
            cursor_y += ROW_DEPTH_FT;
            cursor_x = 0;
        }

        items.push(PlacedUnit {
            device_id: spec.id.to_string(),
            name: spec.name.to_string(),
            x: cursor_x,
            y: cursor_y,
            width: spec.width,
            depth: spec.depth,
        });

        cursor_x += spec.width;
        max_right = max_right.max(cursor_x);
    }

    let total_depth = if items.is_empty() {
        0
    } else {
        cursor_y + ROW_DEPTH_FT
    };

    LayoutResult {
        items,
        total_width: max_right,
        total_depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(layout: &LayoutResult) -> Vec<&str> {
        layout.items.iter().map(|u| u.device_id.as_str()).collect()
    }

    #[test]
    fn empty_selection_yields_empty_layout() {
        let layout = compute_layout(&[]);
        assert!(layout.items.is_empty());
        assert_eq!(layout.total_width, 0);
        assert_eq!(layout.total_depth, 0);
    }

    #[test]
    fn single_powerpack_at_origin() {
        let layout = compute_layout(&[DeviceSelection::new("powerpack", 1)]);
        assert_eq!(layout.items.len(), 2);
        let first = &layout.items[0];
        assert_eq!((first.x, first.y, first.width), (0, 0, 10));
        assert_eq!(first.device_id, "powerpack");
        assert_eq!(ids(&layout), ["powerpack", "transformer"]);
    }

    #[test]
    fn transformers_follow_every_second_battery() {
        let layout = compute_layout(&[DeviceSelection::new("powerpack", 4)]);
        assert_eq!(
            ids(&layout),
            [
                "powerpack",
                "powerpack",
                "transformer",
                "powerpack",
                "powerpack",
                "transformer"
            ]
        );
    }

    #[test]
    fn odd_count_appends_leftover_transformer() {
        let layout = compute_layout(&[DeviceSelection::new("megapack", 3)]);
        assert_eq!(
            ids(&layout),
            ["megapack", "megapack", "transformer", "megapack", "transformer"]
        );
    }

    #[test]
    fn wraps_when_row_would_overflow() {
        let layout = compute_layout(&[DeviceSelection::new("megapack-xl", 3)]);
        let xl: Vec<&PlacedUnit> = layout
            .items
            .iter()
            .filter(|u| u.device_id == "megapack-xl")
            .collect();
        assert_eq!((xl[0].x, xl[0].y), (0, 0));
        assert_eq!((xl[1].x, xl[1].y), (40, 0));
        // XL, XL, TX fill 90ft; the third XL starts row two.
        assert_eq!((xl[2].x, xl[2].y), (0, 10));
    }

    #[test]
    fn ten_powerpacks_fill_two_rows() {
        let layout = compute_layout(&[DeviceSelection::new("powerpack", 10)]);
        assert_eq!(layout.items.len(), 15);
        assert_eq!(layout.total_width, 100);
        assert_eq!(layout.total_depth, 20);
    }

    #[test]
    fn rows_never_exceed_site_width() {
        let layout = compute_layout(&[DeviceSelection::new("megapack-xl", 20)]);
        for unit in &layout.items {
            assert!(unit.right() <= SITE_MAX_WIDTH_FT, "{unit:?}");
        }
        assert!(layout.total_width <= SITE_MAX_WIDTH_FT);
    }

    #[test]
    fn mixed_types_keep_selection_order() {
        let layout = compute_layout(&[
            DeviceSelection::new("megapack-xl", 1),
            DeviceSelection::new("megapack-2", 1),
            DeviceSelection::new("powerpack", 1),
        ]);
        assert_eq!(
            ids(&layout),
            [
                "megapack-xl",
                "megapack-2",
                "transformer",
                "powerpack",
                "transformer"
            ]
        );
    }

    #[test]
    fn cadence_spans_selection_boundaries() {
        let layout = compute_layout(&[
            DeviceSelection::new("megapack", 1),
            DeviceSelection::new("powerpack", 1),
        ]);
        assert_eq!(ids(&layout), ["megapack", "powerpack", "transformer"]);
    }

    #[test]
    fn unknown_ids_are_skipped() {
        let layout = compute_layout(&[
            DeviceSelection::new("unknown-device", 5),
            DeviceSelection::new("powerpack", 2),
        ]);
        assert_eq!(ids(&layout), ["powerpack", "powerpack", "transformer"]);
    }

    #[test]
    fn zero_quantity_places_nothing() {
        let layout = compute_layout(&[DeviceSelection::new("megapack", 0)]);
        assert!(layout.items.is_empty());
        assert_eq!(layout.total_depth, 0);
    }

    #[test]
    fn explicit_transformer_is_placed_without_extra_support() {
        let layout = compute_layout(&[DeviceSelection::new("transformer", 1)]);
        assert_eq!(ids(&layout), ["transformer"]);
    }

    #[test]
    fn oversized_unit_lands_at_row_start() {
        static WIDE: DeviceSpec = DeviceSpec {
            id: "wide",
            name: "Wide",
            width: 120,
            depth: ROW_DEPTH_FT,
            energy: 0.0,
            cost: 0,
        };
        let layout = pack_rows(&[&TRANSFORMER, &WIDE, &TRANSFORMER]);
        let placed: Vec<(u32, u32)> = layout.items.iter().map(|u| (u.x, u.y)).collect();
        assert_eq!(placed, [(0, 0), (0, 10), (0, 20)]);
        assert_eq!(layout.total_width, 120);
        assert_eq!(layout.total_depth, 30);
    }

    #[test]
    fn layout_is_deterministic() {
        let selections = [
            DeviceSelection::new("megapack-2", 3),
            DeviceSelection::new("powerpack", 7),
        ];
        assert_eq!(compute_layout(&selections), compute_layout(&selections));
    }
}
