//! Site data model: user selections in, placed units and totals out.

use serde::{Deserialize, Serialize};

/// Per-device cap applied by interactive selectors. The core never enforces it.
pub const MAX_QUANTITY_PER_DEVICE: u32 = 100;

/// One `(device id, quantity)` entry chosen by the user.
///
/// Ids are not validated here; unknown ids contribute nothing downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSelection {
    pub device_id: String,
    pub quantity: u32,
}

impl DeviceSelection {
    /// Creates a selection entry.
    pub fn new(device_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            device_id: device_id.into(),
            quantity,
        }
    }
}

/// A complete site configuration: the unit that is persisted and shared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteConfig {
    #[serde(default)]
    pub selections: Vec<DeviceSelection>,
}

impl SiteConfig {
    /// Wraps an existing selection list.
    pub fn new(selections: Vec<DeviceSelection>) -> Self {
        Self { selections }
    }

    /// Quantity of the first entry for `device_id`, or 0 if absent.
    pub fn quantity_of(&self, device_id: &str) -> u32 {
        self.selections
            .iter()
            .find(|s| s.device_id == device_id)
            .map_or(0, |s| s.quantity)
    }

    /// Replaces every entry for `device_id` with a single entry at the end.
    ///
    /// A quantity of 0 removes the device entirely. Because the entry is
    /// re-appended, the edited device moves to the end of the placement order.
    pub fn set_quantity(&mut self, device_id: &str, quantity: u32) {
        self.selections.retain(|s| s.device_id != device_id);
        if quantity > 0 {
            self.selections.push(DeviceSelection::new(device_id, quantity));
        }
    }

    /// Removes all selections.
    pub fn clear(&mut self) {
        self.selections.clear();
    }

    /// Returns `true` when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}

/// One physical footprint on the site plan. Coordinates are the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedUnit {
    pub device_id: String,
    pub name: String,
    /// Distance from the left site edge (ft).
    pub x: u32,
    /// Distance from the top site edge (ft).
    pub y: u32,
    pub width: u32,
    pub depth: u32,
}

impl PlacedUnit {
    /// Right edge of the footprint (ft).
    pub fn right(&self) -> u32 {
        self.x + self.width
    }
}

/// Output of the layout engine.
///
/// `items` are in placement order, which is itself meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutResult {
    pub items: Vec<PlacedUnit>,
    /// Largest right edge of any placed unit (ft), 0 when empty.
    pub total_width: u32,
    /// Bottom edge of the last occupied row (ft), 0 when empty.
    pub total_depth: u32,
}

/// Aggregate cost and energy for a selection list.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Totals {
    /// Total price including derived transformers.
    pub cost: u64,
    /// Net energy (MWh) after transformer consumption.
    pub energy: f64,
}
