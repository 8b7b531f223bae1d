//! Card grid: the terminal rendering of the tracker cards.
//!
//! The grid is the [`CardSurface`] the controller draws on. It keeps one view
//! per card, loads each portrait whenever the cards are replaced and lays the
//! visible cards out row by row.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::Theme;
use crate::constants::{CROSSED_OVERLAY_PATH, NO_IMAGE_LABEL};
use crate::models::CardDescriptor;
use crate::services::{AssetLoader, CardSurface, ImageStatus};

/// Outer width of one card, borders included.
pub const CARD_WIDTH: u16 = 24;
/// Outer height of one card: portrait, name and overlay lines plus borders.
pub const CARD_HEIGHT: u16 = 5;
/// Horizontal gap between cards.
pub const CARD_GAP: u16 = 1;

/// Focus movement on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusMove {
    /// One row up
    Up,
    /// One row down
    Down,
    /// One card left
    Left,
    /// One card right
    Right,
    /// First visible card
    First,
    /// Last visible card
    Last,
}

/// One rendered card.
#[derive(Debug, Clone)]
pub struct CardView {
    /// Descriptor the card was rendered from
    pub card: CardDescriptor,
    /// Portrait load outcome for this render
    pub portrait: ImageStatus,
    /// Hidden by the search filter
    pub hidden: bool,
}

/// Grid of survivor cards.
#[derive(Debug)]
pub struct CardGrid {
    loader: AssetLoader,
    cards: Vec<CardView>,
    overlay: ImageStatus,
    stats: String,
    focused: Option<usize>,
    scroll_row: usize,
}

impl CardGrid {
    /// Creates an empty grid loading images through `loader`.
    #[must_use]
    pub fn new(loader: AssetLoader) -> Self {
        Self {
            loader,
            cards: Vec::new(),
            overlay: ImageStatus::Failed,
            stats: String::new(),
            focused: None,
            scroll_row: 0,
        }
    }

    /// All card views, hidden ones included.
    #[must_use]
    pub fn cards(&self) -> &[CardView] {
        &self.cards
    }

    /// Latest stats line.
    #[must_use]
    pub fn stats(&self) -> &str {
        &self.stats
    }

    /// Load outcome of the crossed-out overlay image.
    #[must_use]
    pub fn overlay(&self) -> ImageStatus {
        self.overlay
    }

    /// Index of the focused card.
    #[must_use]
    pub fn focused(&self) -> Option<usize> {
        self.focused
    }

    /// Name of the focused card.
    #[must_use]
    pub fn focused_name(&self) -> Option<&str> {
        self.focused
            .and_then(|i| self.cards.get(i))
            .map(|view| view.card.name.as_str())
    }

    /// Focuses the card at `index` if it exists and is visible.
    pub fn focus(&mut self, index: usize) {
        if self.cards.get(index).is_some_and(|view| !view.hidden) {
            self.focused = Some(index);
        }
    }

    /// Indices of the cards not hidden by the filter, in display order.
    #[must_use]
    pub fn visible_indices(&self) -> Vec<usize> {
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, view)| !view.hidden)
            .map(|(i, _)| i)
            .collect()
    }

    /// Number of card columns that fit in `area`.
    #[must_use]
    pub fn columns(area: Rect) -> usize {
        let inner = Self::inner(area);
        (((inner.width + CARD_GAP) / (CARD_WIDTH + CARD_GAP)) as usize).max(1)
    }

    fn rows_fit(area: Rect) -> usize {
        ((Self::inner(area).height / CARD_HEIGHT) as usize).max(1)
    }

    fn inner(area: Rect) -> Rect {
        Block::default().borders(Borders::ALL).inner(area)
    }

    /// Screen rectangle of the card at display position `slot`, if on screen.
    #[must_use]
    pub fn card_rect(&self, area: Rect, slot: usize) -> Option<Rect> {
        let columns = Self::columns(area);
        let row = slot / columns;
        let col = slot % columns;
        if row < self.scroll_row || row >= self.scroll_row + Self::rows_fit(area) {
            return None;
        }

        let inner = Self::inner(area);
        let x = inner.x + col as u16 * (CARD_WIDTH + CARD_GAP);
        let y = inner.y + (row - self.scroll_row) as u16 * CARD_HEIGHT;
        let rect = Rect::new(x, y, CARD_WIDTH, CARD_HEIGHT).intersection(inner);
        (!rect.is_empty()).then_some(rect)
    }

    /// Card index under the terminal cell `(column, row)`.
    #[must_use]
    pub fn card_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        self.visible_indices()
            .into_iter()
            .enumerate()
            .find(|&(slot, _)| {
                self.card_rect(area, slot).is_some_and(|rect| {
                    column >= rect.x
                        && column < rect.x + rect.width
                        && row >= rect.y
                        && row < rect.y + rect.height
                })
            })
            .map(|(_, index)| index)
    }

    /// Moves focus among the visible cards laid out `columns` wide.
    pub fn move_focus(&mut self, direction: FocusMove, columns: usize) {
        let visible = self.visible_indices();
        let Some(&last_index) = visible.last() else {
            self.focused = None;
            return;
        };
        let columns = columns.max(1);
        let last = visible.len() - 1;
        let Some(slot) = self
            .focused
            .and_then(|focused| visible.iter().position(|&i| i == focused))
        else {
            self.focused = visible.first().copied();
            return;
        };

        let target = match direction {
            FocusMove::Up => slot.checked_sub(columns).unwrap_or(slot),
            FocusMove::Down => {
                if slot + columns <= last {
                    slot + columns
                } else {
                    slot
                }
            }
            FocusMove::Left => slot.saturating_sub(1),
            FocusMove::Right => (slot + 1).min(last),
            FocusMove::First => 0,
            FocusMove::Last => last,
        };
        self.focused = Some(visible.get(target).copied().unwrap_or(last_index));
    }

    /// Adjusts scrolling so the focused card is on screen.
    pub fn scroll_to_focus(&mut self, area: Rect) {
        let visible = self.visible_indices();
        let Some(slot) = self
            .focused
            .and_then(|focused| visible.iter().position(|&i| i == focused))
        else {
            self.scroll_row = 0;
            return;
        };

        let row = slot / Self::columns(area);
        let rows_fit = Self::rows_fit(area);
        if row < self.scroll_row {
            self.scroll_row = row;
        } else if row >= self.scroll_row + rows_fit {
            self.scroll_row = row + 1 - rows_fit;
        }
    }

    /// Renders the visible cards into `area`.
    pub fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let visible = self.visible_indices();
        let block = Block::default()
            .title(format!(" Survivors ({}/{}) ", visible.len(), self.cards.len()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        f.render_widget(block, area);

        if visible.is_empty() {
            let inner = Self::inner(area);
            let message = Paragraph::new(Line::from(Span::styled(
                "No survivors match the search",
                Style::default().fg(theme.text_muted),
            )))
            .alignment(Alignment::Center);
            if inner.height > 0 {
                let line = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
                f.render_widget(message, line);
            }
            return;
        }

        for (slot, &index) in visible.iter().enumerate() {
            if let Some(rect) = self.card_rect(area, slot) {
                self.render_card(f, rect, &self.cards[index], self.focused == Some(index), theme);
            }
        }
    }

    fn render_card(&self, f: &mut Frame, rect: Rect, view: &CardView, focused: bool, theme: &Theme) {
        let border = if focused {
            theme.accent
        } else if view.card.tracked {
            theme.tracked
        } else {
            theme.primary
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .style(Style::default().bg(theme.surface));
        let inner = block.inner(rect);
        let width = inner.width as usize;

        let portrait = match view.portrait {
            ImageStatus::Loaded(_) => Line::from(Span::styled(
                format!("[ {} ]", initials(&view.card.name)),
                Style::default().fg(theme.text).add_modifier(Modifier::BOLD),
            )),
            ImageStatus::Failed => Line::from(Span::styled(
                format!("{NO_IMAGE_LABEL:^width$}"),
                Style::default()
                    .fg(theme.placeholder_fg)
                    .bg(theme.placeholder_bg),
            )),
        };

        let name_style = if view.card.tracked {
            Style::default()
                .fg(theme.text_muted)
                .add_modifier(Modifier::CROSSED_OUT)
        } else {
            Style::default().fg(theme.text)
        };
        let name = Line::from(Span::styled(truncate(&view.card.name, width), name_style));

        let overlay = if view.card.tracked && !self.overlay.is_fallback() {
            Line::from(Span::styled(
                "✕ TRACKED",
                Style::default()
                    .fg(theme.tracked)
                    .add_modifier(Modifier::BOLD),
            ))
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![portrait, name, overlay])
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(paragraph, rect);
    }
}

impl CardSurface for CardGrid {
    fn replace_cards(&mut self, cards: Vec<CardDescriptor>) {
        self.overlay = self.loader.status(CROSSED_OVERLAY_PATH);
        self.cards = cards
            .into_iter()
            .map(|card| CardView {
                portrait: self.loader.status(&card.image_path),
                card,
                hidden: false,
            })
            .collect();
        if self.focused.is_some_and(|i| i >= self.cards.len()) {
            self.focused = None;
        }
    }

    fn apply_visibility(&mut self, visible: &[bool]) {
        for (view, &shown) in self.cards.iter_mut().zip(visible) {
            view.hidden = !shown;
        }

        let focus_hidden = self
            .focused
            .and_then(|i| self.cards.get(i))
            .map_or(true, |view| view.hidden);
        if focus_hidden {
            self.focused = self.visible_indices().first().copied();
        }
    }

    fn set_stats(&mut self, stats: String) {
        self.stats = stats;
    }
}

/// Up to two uppercase initials, e.g. `"JP"` for "Jake Park".
fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().find(|c| c.is_alphanumeric()))
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let mut out: String = text.chars().take(width.saturating_sub(1)).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::card::build_cards;
    use crate::models::Catalog;
    use ratatui::{backend::TestBackend, Terminal};
    use std::fs;
    use tempfile::TempDir;

    const WEBP: &[u8] = b"RIFF\x24\x00\x00\x00WEBPVP8 \x00\x00";
    const PNG: &[u8] = b"\x89PNG\r\n\x1a\n\x00\x00\x00\x0dIHDR";

    fn catalog() -> Catalog {
        Catalog::from_names(["Dwight Fairfield", "Meg Thomas", "Claudette Morel", "Jake Park"])
    }

    fn grid_with(assets: &TempDir, tracked: &[&str]) -> CardGrid {
        let mut grid = CardGrid::new(AssetLoader::new(assets.path()));
        grid.replace_cards(build_cards(&catalog(), |name| tracked.contains(&name)));
        grid.apply_visibility(&[true; 4]);
        grid
    }

    fn buffer_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_portraits_load_per_card() {
        let assets = TempDir::new().unwrap();
        fs::create_dir_all(assets.path().join("gallery/portraits")).unwrap();
        fs::write(assets.path().join("gallery/portraits/meg_thomas.webp"), WEBP).unwrap();
        // Present but not an image
        fs::write(assets.path().join("gallery/portraits/jake_park.webp"), b"oops").unwrap();

        let grid = grid_with(&assets, &[]);
        let statuses: Vec<bool> = grid.cards().iter().map(|v| v.portrait.is_fallback()).collect();
        assert_eq!(statuses, vec![true, false, true, true]);
        assert!(grid.overlay().is_fallback());
    }

    #[test]
    fn test_replace_cards_retries_loading() {
        let assets = TempDir::new().unwrap();
        let mut grid = grid_with(&assets, &[]);
        assert!(grid.cards()[0].portrait.is_fallback());

        fs::create_dir_all(assets.path().join("gallery/portraits")).unwrap();
        fs::write(assets.path().join("gallery/portraits/dwight_fairfield.webp"), WEBP).unwrap();
        fs::write(assets.path().join("gallery/crossed.png"), PNG).unwrap();
        grid.replace_cards(build_cards(&catalog(), |_| false));

        assert!(!grid.cards()[0].portrait.is_fallback());
        assert!(!grid.overlay().is_fallback());
    }

    #[test]
    fn test_hidden_focus_moves_to_first_visible() {
        let assets = TempDir::new().unwrap();
        let mut grid = grid_with(&assets, &[]);
        assert_eq!(grid.focused(), Some(0));

        grid.apply_visibility(&[false, false, false, true]);
        assert_eq!(grid.focused_name(), Some("Jake Park"));

        grid.apply_visibility(&[false; 4]);
        assert_eq!(grid.focused(), None);
        assert!(grid.visible_indices().is_empty());
    }

    #[test]
    fn test_move_focus_wraps_rows() {
        let assets = TempDir::new().unwrap();
        let mut grid = grid_with(&assets, &[]);

        grid.move_focus(FocusMove::Right, 2);
        assert_eq!(grid.focused(), Some(1));
        grid.move_focus(FocusMove::Down, 2);
        assert_eq!(grid.focused(), Some(3));
        grid.move_focus(FocusMove::Down, 2);
        assert_eq!(grid.focused(), Some(3));
        grid.move_focus(FocusMove::Up, 2);
        assert_eq!(grid.focused(), Some(1));
        grid.move_focus(FocusMove::Left, 2);
        grid.move_focus(FocusMove::Left, 2);
        assert_eq!(grid.focused(), Some(0));
        grid.move_focus(FocusMove::Last, 2);
        assert_eq!(grid.focused(), Some(3));
    }

    #[test]
    fn test_move_focus_skips_hidden_cards() {
        let assets = TempDir::new().unwrap();
        let mut grid = grid_with(&assets, &[]);
        grid.apply_visibility(&[true, false, false, true]);

        grid.move_focus(FocusMove::Right, 4);
        assert_eq!(grid.focused_name(), Some("Jake Park"));
    }

    #[test]
    fn test_card_at_hit_testing() {
        let assets = TempDir::new().unwrap();
        let grid = grid_with(&assets, &[]);
        // Inner width 78 fits three cards per row
        let area = Rect::new(0, 0, 80, 20);
        assert_eq!(CardGrid::columns(area), 3);

        assert_eq!(grid.card_at(area, 1, 1), Some(0));
        assert_eq!(grid.card_at(area, 1 + CARD_WIDTH + CARD_GAP, 2), Some(1));
        assert_eq!(grid.card_at(area, 1, 1 + CARD_HEIGHT), Some(3));
        // Gap between cards
        assert_eq!(grid.card_at(area, 1 + CARD_WIDTH, 1), None);
        // Border
        assert_eq!(grid.card_at(area, 0, 0), None);
    }

    #[test]
    fn test_scroll_keeps_focus_on_screen() {
        let assets = TempDir::new().unwrap();
        let mut grid = grid_with(&assets, &[]);
        // One column, one row of cards on screen
        let area = Rect::new(0, 0, 30, CARD_HEIGHT + 2);

        grid.move_focus(FocusMove::Last, CardGrid::columns(area));
        grid.scroll_to_focus(area);
        assert_eq!(grid.card_at(area, 2, 2), Some(3));

        grid.move_focus(FocusMove::First, CardGrid::columns(area));
        grid.scroll_to_focus(area);
        assert_eq!(grid.card_at(area, 2, 2), Some(0));
    }

    #[test]
    fn test_render_shows_fallback_and_overlay() {
        let assets = TempDir::new().unwrap();
        fs::create_dir_all(assets.path().join("gallery")).unwrap();
        fs::write(assets.path().join("gallery/crossed.png"), PNG).unwrap();
        let grid = grid_with(&assets, &["Meg Thomas"]);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| grid.render(f, f.area(), &Theme::dark()))
            .unwrap();
        let text = buffer_text(&terminal);

        assert!(text.contains("No Image"));
        assert!(text.contains("Meg Thomas"));
        assert!(text.contains("TRACKED"));
        assert!(text.contains("Survivors (4/4)"));
    }

    #[test]
    fn test_render_empty_result() {
        let assets = TempDir::new().unwrap();
        let mut grid = grid_with(&assets, &[]);
        grid.apply_visibility(&[false; 4]);

        let mut terminal = Terminal::new(TestBackend::new(80, 20)).unwrap();
        terminal
            .draw(|f| grid.render(f, f.area(), &Theme::dark()))
            .unwrap();

        assert!(buffer_text(&terminal).contains("No survivors match the search"));
    }

    #[test]
    fn test_initials_and_truncate() {
        assert_eq!(initials("Jake Park"), "JP");
        assert_eq!(initials("Élodie Rakoto"), "ÉR");
        assert_eq!(initials("The Troupe (Aestri Yazar)"), "TT");
        assert_eq!(truncate("Dwight Fairfield", 6), "Dwigh…");
        assert_eq!(truncate("Meg", 6), "Meg");
    }
}
