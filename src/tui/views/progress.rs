//! Progress indicator and finished-step views

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;

use crate::tui::widgets::{panel_style, themed_block, COLOR_MUTED};
use crate::workflow::Spinner;

pub fn draw_spinner(frame: &mut Frame<'_>, area: Rect, spinner: &Spinner) {
    let line = Line::from(vec![
        Span::styled(
            format!("{} ", spinner.glyph()),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{}...", spinner.label())),
    ]);

    let paragraph = Paragraph::new(line)
        .style(panel_style())
        .block(themed_block("Working", COLOR_MUTED));
    frame.render_widget(paragraph, area);
}

pub fn draw_completed(frame: &mut Frame<'_>, area: Rect, completed: &[String]) {
    if completed.is_empty() {
        return;
    }

    let lines: Vec<Line> = completed
        .iter()
        .map(|label| {
            Line::from(vec![
                Span::styled("✓ ", Style::default().fg(Color::Green)),
                Span::raw(label.clone()),
            ])
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).style(panel_style()),
        area,
    );
}
