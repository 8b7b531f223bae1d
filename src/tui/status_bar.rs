//! Status bar widget for displaying status messages and key hints

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{AppState, Focus, Theme};
use crate::storage::KeyValueStore;

const GRID_HINTS: &[(&str, &str)] = &[
    ("←↑↓→", "Move"),
    ("Space", "Toggle"),
    ("/", "Search"),
    ("A", "Select all"),
    ("D", "Deselect all"),
    ("q", "Quit"),
];

const SEARCH_HINTS: &[(&str, &str)] = &[
    ("Type", "Filter"),
    ("Enter", "Back to cards"),
    ("Esc", "Clear"),
    ("Ctrl+U", "Clear"),
];

const DIALOG_HINTS: &[(&str, &str)] = &[
    ("y", "Confirm"),
    ("n/Esc", "Cancel"),
    ("Tab", "Switch button"),
    ("Enter", "Press button"),
];

/// Status bar widget
pub struct StatusBar;

impl StatusBar {
    /// Render the status bar with contextual hints
    pub fn render<S: KeyValueStore>(f: &mut Frame, area: Rect, state: &AppState<S>, theme: &Theme) {
        let mut lines: Vec<Line> = Vec::new();

        // First line: error or status message
        if let Some(error) = &state.error_message {
            lines.push(Line::from(vec![
                Span::styled("ERROR: ", Style::default().fg(theme.error)),
                Span::styled(error.as_str(), Style::default().fg(theme.text)),
            ]));
        } else {
            lines.push(Line::from(Span::styled(
                state.status_message.as_str(),
                Style::default().fg(theme.text),
            )));
        }

        if state.config.ui.show_hints {
            lines.push(Self::hints_line(Self::current_hints(state), theme));
        }

        let status = Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Status ")
                .style(Style::default().bg(theme.background)),
        );

        f.render_widget(status, area);
    }

    fn current_hints<S: KeyValueStore>(state: &AppState<S>) -> &'static [(&'static str, &'static str)] {
        if state.confirm.is_open() {
            DIALOG_HINTS
        } else {
            match state.focus {
                Focus::Grid => GRID_HINTS,
                Focus::Search => SEARCH_HINTS,
            }
        }
    }

    fn hints_line(hints: &'static [(&'static str, &'static str)], theme: &Theme) -> Line<'static> {
        let mut spans: Vec<Span<'static>> = Vec::new();
        for (i, (key, action)) in hints.iter().enumerate() {
            if i > 0 {
                spans.push(Span::raw(" | "));
            }
            spans.push(Span::styled(
                *key,
                Style::default()
                    .fg(theme.accent)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(": "));
            spans.push(Span::styled(*action, Style::default().fg(theme.text_muted)));
        }
        Line::from(spans)
    }
}
