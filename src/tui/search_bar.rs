//! Single-line search input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::component::Component;
use super::Theme;

/// Events emitted by the search bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    /// The query text changed
    Changed(String),
    /// The user finished typing (Enter, Tab, Down)
    Done,
}

/// Search text with a cursor.
#[derive(Debug, Clone, Default)]
pub struct SearchBar {
    query: String,
    /// Cursor position in characters
    cursor: usize,
    focused: bool,
}

impl SearchBar {
    /// Creates an empty, unfocused search bar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Whether the search bar receives key input.
    #[must_use]
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Gives or takes keyboard focus.
    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if focused {
            self.cursor = self.query.chars().count();
        }
    }

    /// Empties the text.
    pub fn clear(&mut self) {
        self.query.clear();
        self.cursor = 0;
    }

    fn byte_index(&self) -> usize {
        self.query
            .char_indices()
            .nth(self.cursor)
            .map_or(self.query.len(), |(i, _)| i)
    }

    fn insert(&mut self, c: char) {
        let index = self.byte_index();
        self.query.insert(index, c);
        self.cursor += 1;
    }

    fn delete_before_cursor(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        let index = self.byte_index();
        self.query.remove(index);
        true
    }

    fn delete_at_cursor(&mut self) -> bool {
        if self.cursor >= self.query.chars().count() {
            return false;
        }
        let index = self.byte_index();
        self.query.remove(index);
        true
    }

    fn changed(&self) -> Option<SearchEvent> {
        Some(SearchEvent::Changed(self.query.clone()))
    }
}

impl Component for SearchBar {
    type Event = SearchEvent;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('u') if ctrl => {
                if self.query.is_empty() {
                    None
                } else {
                    self.clear();
                    self.changed()
                }
            }
            KeyCode::Char(_) if ctrl => None,
            KeyCode::Char(c) => {
                self.insert(c);
                self.changed()
            }
            KeyCode::Backspace => self.delete_before_cursor().then(|| self.changed())?,
            KeyCode::Delete => self.delete_at_cursor().then(|| self.changed())?,
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(self.query.chars().count());
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = self.query.chars().count();
                None
            }
            KeyCode::Esc => {
                let had_text = !self.query.is_empty();
                self.clear();
                if had_text {
                    self.changed()
                } else {
                    Some(SearchEvent::Done)
                }
            }
            KeyCode::Enter | KeyCode::Tab | KeyCode::Down => Some(SearchEvent::Done),
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let border = if self.focused {
            theme.accent
        } else {
            theme.primary
        };

        let content = if self.query.is_empty() && !self.focused {
            Line::from(Span::styled(
                "Search survivors...  (/)",
                Style::default().fg(theme.text_muted),
            ))
        } else {
            Line::from(Span::styled(
                self.query.as_str(),
                Style::default().fg(theme.text),
            ))
        };

        let widget = Paragraph::new(content).block(
            Block::default()
                .title(" Search ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .style(Style::default().bg(theme.background)),
        );
        f.render_widget(widget, area);

        if self.focused && area.width > 2 && area.height > 2 {
            let offset = self.query.chars().take(self.cursor).count() as u16;
            let x = (area.x + 1 + offset).min(area.x + area.width - 2);
            f.set_cursor_position((x, area.y + 1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(bar: &mut SearchBar, text: &str) -> Option<SearchEvent> {
        let mut last = None;
        for c in text.chars() {
            last = bar.handle_input(key(KeyCode::Char(c)));
        }
        last
    }

    #[test]
    fn test_typing_emits_changes() {
        let mut bar = SearchBar::new();
        bar.set_focused(true);

        assert_eq!(
            type_text(&mut bar, "jake"),
            Some(SearchEvent::Changed("jake".to_string()))
        );
        assert_eq!(bar.query(), "jake");
    }

    #[test]
    fn test_backspace_and_cursor_editing() {
        let mut bar = SearchBar::new();
        bar.set_focused(true);
        type_text(&mut bar, "élodie");

        bar.handle_input(key(KeyCode::Home));
        assert_eq!(bar.handle_input(key(KeyCode::Backspace)), None);
        assert_eq!(
            bar.handle_input(key(KeyCode::Delete)),
            Some(SearchEvent::Changed("lodie".to_string()))
        );

        bar.handle_input(key(KeyCode::End));
        assert_eq!(
            bar.handle_input(key(KeyCode::Backspace)),
            Some(SearchEvent::Changed("lodi".to_string()))
        );
    }

    #[test]
    fn test_escape_clears_then_finishes() {
        let mut bar = SearchBar::new();
        bar.set_focused(true);
        type_text(&mut bar, "meg");

        assert_eq!(
            bar.handle_input(key(KeyCode::Esc)),
            Some(SearchEvent::Changed(String::new()))
        );
        assert_eq!(bar.handle_input(key(KeyCode::Esc)), Some(SearchEvent::Done));
    }

    #[test]
    fn test_ctrl_u_clears() {
        let mut bar = SearchBar::new();
        type_text(&mut bar, "ada");

        let event = bar.handle_input(KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
        assert_eq!(event, Some(SearchEvent::Changed(String::new())));
        assert_eq!(bar.query(), "");
    }

    #[test]
    fn test_enter_finishes() {
        let mut bar = SearchBar::new();
        assert_eq!(bar.handle_input(key(KeyCode::Enter)), Some(SearchEvent::Done));
    }
}
