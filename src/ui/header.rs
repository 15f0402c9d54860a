//! Top header with connection state and key hints.

use ratatui::{
    layout::Rect,
    widgets::{Block, Borders},
};

use crate::types::ConnectionState;

pub fn draw(f: &mut ratatui::Frame<'_>, area: Rect, state: ConnectionState, port: Option<&str>) {
    let title = match (state, port) {
        (ConnectionState::Connected, Some(p)) => {
            format!("statline — streaming to {p}  (press 'q' to quit)")
        }
        _ => "statline — disconnected  ('c' connect, 'm' compact, 'q' quit)".to_string(),
    };
    f.render_widget(Block::default().title(title).borders(Borders::BOTTOM), area);
}
