//! List picker view

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{List, ListItem, ListState, Paragraph};
use ratatui::Frame;

use crate::tui::ellipsize;
use crate::tui::widgets::{panel_style, themed_block, COLOR_FOCUS, COLOR_MUTED, COLOR_SELECTED};
use crate::workflow::Picker;

pub fn draw_picker(frame: &mut Frame<'_>, area: Rect, picker: &Picker) {
    let position = match picker.selected() {
        Some(_) => format!("{}/{}", picker.cursor() + 1, picker.items().len()),
        None => "0/0".to_string(),
    };
    let block = themed_block(format!("{} ({})", picker.title(), position), COLOR_FOCUS);

    if picker.items().is_empty() {
        let empty = Paragraph::new(Line::styled(
            "Nothing to choose from. Enter or q to exit.",
            Style::default().fg(COLOR_MUTED),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let width = area.width.saturating_sub(6) as usize;
    let items: Vec<ListItem> = picker
        .items()
        .iter()
        .map(|item| ListItem::new(ellipsize(item, width)))
        .collect();

    let list = List::new(items)
        .block(block)
        .style(panel_style())
        .highlight_symbol("> ")
        .highlight_style(
            Style::default()
                .bg(COLOR_SELECTED)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    state.select(picker.selected());
    frame.render_stateful_widget(list, area, &mut state);
}
