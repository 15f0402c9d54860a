//! CPU gauge.

use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge},
};

use crate::types::Sample;
use crate::ui::theme;

pub fn draw(f: &mut ratatui::Frame<'_>, area: Rect, s: Option<&Sample>) {
    let pct = s.map(|s| s.cpu as u16).unwrap_or(0);
    let g = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("CPU"))
        .gauge_style(Style::default().fg(theme::CPU))
        .percent(pct)
        .label(format!("{pct}%"));
    f.render_widget(g, area);
}
