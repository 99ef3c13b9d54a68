/// Transformer count, cost, and energy totals.
pub mod accounting;
/// Row-packing layout engine.
pub mod layout;
pub mod summary;
pub mod types;

pub use accounting::{compute_totals, required_support_count};
pub use layout::compute_layout;
pub use summary::SiteSummary;
pub use types::{DeviceSelection, LayoutResult, PlacedUnit, SiteConfig, Totals};
