//! Color constants and device labels for the TUI.

use ratatui::style::Color;

/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::Red;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Highlighted device row.
pub const SELECTED_BG: Color = Color::DarkGray;
/// Summary values.
pub const VALUE_FG: Color = Color::Cyan;

/// Fill color for a device on the floor plan.
pub fn device_color(device_id: &str) -> Color {
    match device_id {
        "megapack-xl" => Color::LightRed,
        "megapack-2" => Color::LightBlue,
        "megapack" => Color::LightGreen,
        "powerpack" => Color::Yellow,
        "transformer" => Color::Gray,
        _ => Color::White,
    }
}

/// Short label that fits inside a 10 ft footprint.
pub fn short_label(device_id: &str) -> &'static str {
    match device_id {
        "megapack-xl" => "XL",
        "megapack-2" => "MP2",
        "megapack" => "MP",
        "powerpack" => "PP",
        "transformer" => "TX",
        _ => "?",
    }
}
