//! Serial port selector.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::ui::theme;

pub fn draw(
    f: &mut ratatui::Frame<'_>,
    area: Rect,
    ports: &[String],
    selected: usize,
    connected: bool,
) {
    let title = if connected {
        "Ports"
    } else {
        "Ports (↑/↓ select, 'c' connect, 'r' rescan)"
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if ports.is_empty() {
        f.render_widget(Paragraph::new("no serial ports found").block(block), area);
        return;
    }

    let items: Vec<ListItem> = ports.iter().map(|p| ListItem::new(p.as_str())).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().fg(Color::Black).bg(theme::SELECTION))
        .highlight_symbol("> ");

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}
