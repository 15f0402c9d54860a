//! GPU gauge. Shows 0% when no supported adapter is present.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::types::Sample;
use crate::ui::theme;

pub fn draw(f: &mut ratatui::Frame<'_>, area: Rect, s: Option<&Sample>) {
    let pct = s.map(|s| s.gpu as u16).unwrap_or(0);
    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("GPU"))
        .gauge_style(Style::default().fg(theme::GPU))
        .percent(pct)
        .label(format!("{pct}%"));
    f.render_widget(g, area);
}
