//! Screens drawn by the terminal driver

mod picker;
mod progress;

use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::workflow::{Phase, Spinner, Workflow};

use super::widgets::{draw_status_bar, Tone, COLOR_BG};
use picker::draw_picker;
use progress::{draw_completed, draw_spinner};

const LIST_HINTS: &[(&str, &str)] = &[
    ("↑/k", "up"),
    ("↓/j", "down"),
    ("Enter", "select"),
    ("q/Esc", "quit"),
];
const NO_HINTS: &[(&str, &str)] = &[];

/// Everything a single frame needs
pub enum Screen<'a> {
    Workflow {
        workflow: &'a Workflow,
        completed: &'a [String],
    },
    Progress {
        spinner: &'a Spinner,
        completed: &'a [String],
    },
}

pub fn draw_screen(frame: &mut Frame<'_>, screen: &Screen<'_>) {
    frame.render_widget(
        Block::default().style(Style::default().bg(COLOR_BG)),
        frame.size(),
    );

    let completed = match screen {
        Screen::Workflow { completed, .. } | Screen::Progress { completed, .. } => *completed,
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints(
            [
                Constraint::Length(completed.len() as u16),
                Constraint::Min(5),
                Constraint::Length(4),
            ]
            .as_ref(),
        )
        .split(frame.size());

    draw_completed(frame, chunks[0], completed);

    let (message, tone, hints) = match screen {
        Screen::Workflow { workflow, .. } => match (workflow.phase(), workflow.spinner()) {
            (Phase::Listing { picker, .. }, _) => {
                draw_picker(frame, chunks[1], picker);
                (picker.title().to_string(), Tone::Choosing, LIST_HINTS)
            }
            (_, Some(spinner)) => {
                draw_spinner(frame, chunks[1], spinner);
                (spinner.label().to_string(), Tone::Busy, NO_HINTS)
            }
            _ => (String::new(), Tone::Done, NO_HINTS),
        },
        Screen::Progress { spinner, .. } => {
            draw_spinner(frame, chunks[1], spinner);
            (spinner.label().to_string(), Tone::Busy, NO_HINTS)
        }
    };

    draw_status_bar(frame, chunks[2], &message, tone, hints);
}
