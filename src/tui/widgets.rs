//! Shared styling and the status bar

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

pub const COLOR_BG: Color = Color::Rgb(9, 8, 12);
pub const COLOR_MUTED: Color = Color::Rgb(159, 160, 156);
pub const COLOR_FOCUS: Color = Color::Cyan;
pub const COLOR_SELECTED: Color = Color::Rgb(56, 80, 109);

/// What the status line is reporting on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Waiting for the user to pick something
    Choosing,
    /// Background work in flight
    Busy,
    Done,
}

impl Tone {
    fn color(self) -> Color {
        match self {
            Tone::Choosing => COLOR_FOCUS,
            Tone::Busy => Color::Yellow,
            Tone::Done => Color::Green,
        }
    }
}

/// Background and text colors every panel uses
pub fn panel_style() -> Style {
    Style::default().bg(COLOR_BG).fg(Color::White)
}

pub fn themed_block(title: impl Into<String>, border_color: Color) -> Block<'static> {
    Block::default()
        .title(Span::styled(
            title.into(),
            Style::default()
                .fg(border_color)
                .add_modifier(Modifier::BOLD),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
        .style(panel_style())
}

/// `key action · key action` with the keys highlighted
pub fn hint_line(hints: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::with_capacity(hints.len() * 3);
    for (i, (key, action)) in hints.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled(" · ", Style::default().fg(COLOR_MUTED)));
        }
        spans.push(Span::styled(
            key.to_string(),
            Style::default().fg(COLOR_FOCUS).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {}", action)));
    }
    Line::from(spans)
}

pub fn draw_status_bar(
    frame: &mut Frame<'_>,
    area: Rect,
    message: &str,
    tone: Tone,
    hints: &[(&str, &str)],
) {
    let status = Line::styled(
        message.to_string(),
        Style::default()
            .fg(tone.color())
            .add_modifier(Modifier::BOLD),
    );

    let paragraph = Paragraph::new(vec![status, hint_line(hints)])
        .style(panel_style())
        .block(themed_block("tess", COLOR_MUTED));
    frame.render_widget(paragraph, area);
}
