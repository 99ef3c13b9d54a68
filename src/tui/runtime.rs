//! TUI application state: the selection being edited and its derived plan.

use crate::catalog::{DeviceKind, DeviceSpec};
use crate::site::layout::compute_layout;
use crate::site::summary::SiteSummary;
use crate::site::types::{LayoutResult, MAX_QUANTITY_PER_DEVICE, SiteConfig};

/// TUI application state.
pub struct App {
    /// Name shown in the header.
    pub site_name: String,
    /// Current selections, in placement order.
    pub config: SiteConfig,
    /// Index into [`DeviceKind::SELECTABLE`] of the highlighted row.
    pub selected: usize,
    /// Layout for `config`, recomputed on every edit.
    pub layout: LayoutResult,
    /// Summary for `config`, recomputed on every edit.
    pub summary: SiteSummary,
    /// Whether the user has requested quit.
    pub quit: bool,
}

impl App {
    /// Creates an app editing `config`.
    pub fn new(site_name: &str, config: SiteConfig) -> Self {
        let layout = compute_layout(&config.selections);
        let summary = SiteSummary::new(&config.selections, &layout);
        Self {
            site_name: site_name.to_string(),
            config,
            selected: 0,
            layout,
            summary,
            quit: false,
        }
    }

    fn recompute(&mut self) {
        self.layout = compute_layout(&self.config.selections);
        self.summary = SiteSummary::new(&self.config.selections, &self.layout);
    }

    /// Specification of the highlighted device.
    pub fn selected_spec(&self) -> &'static DeviceSpec {
        DeviceKind::SELECTABLE[self.selected].spec()
    }

    /// Moves the highlight down, wrapping at the end.
    pub fn select_next(&mut self) {
        self.selected = (self.selected + 1) % DeviceKind::SELECTABLE.len();
    }

    /// Moves the highlight up, wrapping at the start.
    pub fn select_prev(&mut self) {
        let n = DeviceKind::SELECTABLE.len();
        self.selected = (self.selected + n - 1) % n;
    }

    fn set_selected_quantity(&mut self, quantity: u32) {
        let id = self.selected_spec().id;
        self.config.set_quantity(id, quantity.min(MAX_QUANTITY_PER_DEVICE));
        self.recompute();
    }

    /// Adds one unit of the highlighted device, up to the selector cap.
    pub fn increment(&mut self) {
        let q = self.config.quantity_of(self.selected_spec().id);
        if q < MAX_QUANTITY_PER_DEVICE {
            self.set_selected_quantity(q + 1);
        }
    }

    /// Removes one unit of the highlighted device.
    pub fn decrement(&mut self) {
        let q = self.config.quantity_of(self.selected_spec().id);
        if q > 0 {
            self.set_selected_quantity(q - 1);
        }
    }

    /// Drops the highlighted device from the selection.
    pub fn zero_selected(&mut self) {
        self.set_selected_quantity(0);
    }

    /// Clears every selection.
    pub fn clear(&mut self) {
        self.config.clear();
        self.recompute();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteFile;
    use crate::site::types::DeviceSelection;

    #[test]
    fn starts_from_given_config() {
        let app = App::new(
            "pilot",
            SiteConfig::new(vec![DeviceSelection::new("megapack", 2)]),
        );
        assert_eq!(app.summary.total_cost, 110_000);
        assert_eq!(app.layout.items.len(), 3);
    }

    #[test]
    fn increment_recomputes_plan() {
        let mut app = App::new("site", SiteConfig::default());
        app.select_prev(); // wraps to powerpack
        assert_eq!(app.selected_spec().id, "powerpack");

        app.increment();
        app.increment();
        assert_eq!(app.config.quantity_of("powerpack"), 2);
        assert_eq!(app.summary.transformers, 1);
        assert_eq!(app.layout.items.len(), 3);

        app.decrement();
        assert_eq!(app.config.quantity_of("powerpack"), 1);
        assert_eq!(app.layout.items.len(), 2);
    }

    #[test]
    fn quantity_stays_within_bounds() {
        let mut app = App::new("site", SiteConfig::default());
        app.decrement();
        assert!(app.config.is_empty());

        for _ in 0..MAX_QUANTITY_PER_DEVICE + 5 {
            app.increment();
        }
        assert_eq!(app.config.quantity_of("megapack-xl"), MAX_QUANTITY_PER_DEVICE);
    }

    #[test]
    fn zero_and_clear() {
        let mut app = App::new("site", SiteFile::mixed().site_config());
        app.zero_selected();
        assert_eq!(app.config.quantity_of("megapack-xl"), 0);
        assert_eq!(app.config.selections.len(), 3);

        app.clear();
        assert!(app.layout.items.is_empty());
        assert_eq!(app.summary.land_size(), "0 x 0 ft");
    }

    #[test]
    fn selection_wraps_both_ways() {
        let mut app = App::new("site", SiteConfig::default());
        for _ in 0..DeviceKind::SELECTABLE.len() {
            app.select_next();
        }
        assert_eq!(app.selected, 0);
    }
}
