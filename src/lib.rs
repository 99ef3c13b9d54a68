//! Battery energy storage site planner.
//!
//! Turns a list of `(device, quantity)` selections into cost and energy
//! totals plus a row-packed floor plan with auto-derived transformers.

#[cfg(feature = "api")]
pub mod api;
pub mod catalog;
pub mod config;
pub mod io;
pub mod session;
pub mod share;
/// Accounting, layout engine, and site data types.
pub mod site;
#[cfg(feature = "tui")]
pub mod tui;
