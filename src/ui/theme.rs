//! Shared UI theme constants.

use ratatui::style::Color;

pub const CPU: Color = Color::Green;
pub const MEM: Color = Color::Magenta;
pub const GPU: Color = Color::LightMagenta;
pub const SELECTION: Color = Color::Rgb(170, 170, 180);
