//! Color constants and axis helpers for the TUI.

use ratatui::style::Color;

use crate::sim::controller::MAX_CHARGE_RATE_KW;

/// Solar production line color.
pub const SOLAR_COLOR: Color = Color::Yellow;
/// Interval controller charging line color.
pub const INTERVAL_COLOR: Color = Color::Cyan;
/// Real-time controller charging line color.
pub const REALTIME_COLOR: Color = Color::Green;
/// Header bar foreground.
pub const HEADER_FG: Color = Color::White;
/// Header bar background.
pub const HEADER_BG: Color = Color::DarkGray;
/// Footer help text color.
pub const FOOTER_FG: Color = Color::DarkGray;
/// Highlight for whichever strategy is currently cheaper.
pub const WINNER_FG: Color = Color::LightGreen;

/// Y-axis upper bound: at least the charger limit, more if the sun beats it.
pub fn y_upper_bound(series: &[&[(f64, f64)]]) -> f64 {
    let max = series
        .iter()
        .flat_map(|s| s.iter().map(|&(_, y)| y))
        .fold(MAX_CHARGE_RATE_KW, f64::max);
    (max * 1.1).ceil()
}
