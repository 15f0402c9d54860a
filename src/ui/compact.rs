//! Compact single-line view, the minimized counterpart of the dashboard.

use ratatui::{layout::Rect, widgets::Paragraph};

use crate::types::{ConnectionState, Sample};

pub fn draw(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    state: ConnectionState,
    s: Option<&Sample>,
) {
    let line = match s {
        Some(s) => format!(
            "CPU {:>3}%  RAM {:>3}%  GPU {:>3}%  [{state}]  ('m' dashboard, 'q' quit)",
            s.cpu, s.ram, s.gpu
        ),
        None => format!("no samples yet  [{state}]  ('m' dashboard, 'q' quit)"),
    };
    f.render_widget(Paragraph::new(line), area);
}
