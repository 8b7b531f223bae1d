//! Terminal user interface: application state, event loop and widgets.
//!
//! The screen is a search bar with the two bulk buttons, the stats line, the
//! card grid and a status bar. A confirmation dialog is drawn over everything
//! while a bulk action is pending.

// Input handlers use Result<bool> for consistency even when they never fail
#![allow(clippy::unnecessary_wraps)]
// Allow intentional type casts for terminal coordinates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_lossless)]

pub mod card_grid;
pub mod component;
pub mod confirm_dialog;
pub mod search_bar;
pub mod status_bar;
pub mod theme;

use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::{error, info};

use crate::config::Config;
use crate::constants::ENTITY_NOUN_PLURAL;
use crate::services::{AssetLoader, BulkAction, Controller};
use crate::shortcuts::{Action, ShortcutRegistry, MAIN_CONTEXT};
use crate::storage::{FileStore, KeyValueStore};

pub use card_grid::{CardGrid, FocusMove};
pub use component::Component;
pub use confirm_dialog::{ConfirmDialog, ConfirmEvent};
pub use search_bar::{SearchBar, SearchEvent};
pub use status_bar::StatusBar;
pub use theme::Theme;

/// Which widget receives keyboard input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// Card grid navigation
    Grid,
    /// Search text entry
    Search,
}

/// Screen regions, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    /// Search input
    pub search: Rect,
    /// "Select All" button
    pub select_all: Rect,
    /// "Deselect All" button
    pub deselect_all: Rect,
    /// Stats line
    pub stats: Rect,
    /// Card grid
    pub grid: Rect,
    /// Status bar
    pub status: Rect,
}

impl ScreenLayout {
    /// Splits the terminal area.
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search + buttons
                Constraint::Length(1), // Stats
                Constraint::Min(card_grid::CARD_HEIGHT + 2),
                Constraint::Length(4), // Status bar
            ])
            .split(area);

        let header = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Min(20),
                Constraint::Length(16),
                Constraint::Length(18),
            ])
            .split(rows[0]);

        Self {
            search: header[0],
            select_all: header[1],
            deselect_all: header[2],
            stats: rows[1],
            grid: rows[2],
            status: rows[3],
        }
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Application state for the interactive tracker.
pub struct AppState<S: KeyValueStore = FileStore> {
    /// Catalog, tracked set and filter
    pub controller: Controller<S>,
    /// Rendered cards
    pub grid: CardGrid,
    /// Search input
    pub search: SearchBar,
    /// Bulk action confirmation
    pub confirm: ConfirmDialog<BulkAction>,
    /// Widget receiving key input
    pub focus: Focus,
    /// Active colors
    pub theme: Theme,
    /// Loaded configuration
    pub config: Config,
    /// Key bindings
    pub shortcuts: ShortcutRegistry,
    /// Last status message
    pub status_message: String,
    /// Last error, shown instead of the status message
    pub error_message: Option<String>,
    /// Set when the loop should exit
    pub should_quit: bool,
    /// Terminal area of the last frame
    pub viewport: Rect,
}

impl<S: KeyValueStore> AppState<S> {
    /// Creates the state and draws the initial cards.
    pub fn new(controller: Controller<S>, loader: AssetLoader, config: Config) -> Self {
        let mut grid = CardGrid::new(loader);
        controller.refresh(&mut grid);

        let orphans = controller.store().orphans(controller.catalog()).len();
        let status_message = if orphans > 0 {
            format!("{orphans} stored entries are not in the catalog")
        } else {
            format!(
                "{} {ENTITY_NOUN_PLURAL} loaded",
                controller.catalog().len()
            )
        };

        Self {
            controller,
            grid,
            search: SearchBar::new(),
            confirm: ConfirmDialog::new(),
            focus: Focus::Grid,
            theme: Theme::from_mode(config.ui.theme_mode),
            config,
            shortcuts: ShortcutRegistry::new(),
            status_message,
            error_message: None,
            should_quit: false,
            viewport: Rect::default(),
        }
    }

    /// Set status message
    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = message.into();
        self.error_message = None;
    }

    /// Set error message
    pub fn set_error(&mut self, error: impl Into<String>) {
        self.error_message = Some(error.into());
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }

    /// Current screen layout.
    #[must_use]
    pub fn layout(&self) -> ScreenLayout {
        ScreenLayout::compute(self.viewport)
    }

    /// Toggles the card at `index`.
    pub fn toggle_card(&mut self, index: usize) {
        let Some(name) = self.grid.cards().get(index).map(|v| v.card.name.clone()) else {
            return;
        };
        self.grid.focus(index);

        match self.controller.toggle(&name, &mut self.grid) {
            Ok(true) => self.set_status(format!("Tracked {name}")),
            Ok(false) => self.set_status(format!("Untracked {name}")),
            Err(e) => {
                error!("{e:#}");
                self.set_error(format!("{e:#}"));
            }
        }
    }

    /// Toggles the focused card.
    pub fn toggle_focused(&mut self) {
        if let Some(index) = self.grid.focused() {
            self.toggle_card(index);
        }
    }

    /// Opens the confirmation dialog for `action`.
    pub fn request_bulk(&mut self, action: BulkAction) {
        self.confirm.show(action.title(), action.message(), action);
    }

    /// Applies the outcome of the confirmation dialog.
    pub fn finish_confirm(&mut self, event: ConfirmEvent<BulkAction>) {
        match event {
            ConfirmEvent::Confirmed(action) => {
                match self.controller.apply(action, &mut self.grid) {
                    Ok(()) => {
                        info!(?action, "bulk action applied");
                        let stats = self.controller.stats_text();
                        self.set_status(stats);
                    }
                    Err(e) => {
                        error!("{e:#}");
                        self.set_error(format!("{e:#}"));
                    }
                }
            }
            ConfirmEvent::Cancelled => self.set_status("Cancelled"),
        }
    }

    /// Replaces the search text and re-filters the cards.
    pub fn set_search(&mut self, query: &str) {
        self.controller.set_search(query, &mut self.grid);
    }

    fn focus_search(&mut self) {
        self.focus = Focus::Search;
        self.search.set_focused(true);
    }

    fn focus_grid(&mut self) {
        self.focus = Focus::Grid;
        self.search.set_focused(false);
    }

    fn grid_columns(&self) -> usize {
        CardGrid::columns(self.layout().grid)
    }
}

/// Initialize terminal for TUI
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend).context("Failed to create terminal")?;
    Ok(terminal)
}

/// Restore terminal to normal state
pub fn restore_terminal(mut terminal: Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;
    Ok(())
}

/// Main event loop
pub fn run_tui<S: KeyValueStore>(
    state: &mut AppState<S>,
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
) -> Result<()> {
    loop {
        terminal.draw(|f| {
            state.viewport = f.area();
            let grid_area = state.layout().grid;
            state.grid.scroll_to_focus(grid_area);
            render(f, state);
        })?;

        // Poll for events with 100ms timeout
        if event::poll(Duration::from_millis(100))? {
            match event::read()? {
                Event::Key(key) => {
                    if handle_key_event(state, key)? {
                        break; // User quit
                    }
                }
                Event::Mouse(mouse) => handle_mouse_event(state, mouse)?,
                // Resize re-renders on the next loop
                _ => {}
            }
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

/// Render the UI from current state
fn render<S: KeyValueStore>(f: &mut Frame, state: &AppState<S>) {
    let theme = &state.theme;
    let full_bg = Block::default().style(Style::default().bg(theme.background));
    f.render_widget(full_bg, f.area());

    let layout = ScreenLayout::compute(f.area());

    state.search.render(f, layout.search, theme);
    render_button(f, layout.select_all, "Select All", theme);
    render_button(f, layout.deselect_all, "Deselect All", theme);

    let stats = Paragraph::new(Line::from(Span::styled(
        state.grid.stats(),
        Style::default()
            .fg(theme.primary)
            .add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(stats, layout.stats);

    state.grid.render(f, layout.grid, theme);
    StatusBar::render(f, layout.status, state, theme);

    if state.confirm.is_open() {
        state.confirm.render(f, f.area(), theme);
    }
}

fn render_button(f: &mut Frame, area: Rect, label: &str, theme: &Theme) {
    let button = Paragraph::new(Line::from(Span::styled(
        label,
        Style::default().fg(theme.text),
    )))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.surface)),
    );
    f.render_widget(button, area);
}

/// Handle keyboard input events. Returns `true` when the user quits.
fn handle_key_event<S: KeyValueStore>(state: &mut AppState<S>, key: KeyEvent) -> Result<bool> {
    if key.kind == KeyEventKind::Release {
        return Ok(false);
    }

    // The modal captures all input while open
    if state.confirm.is_open() {
        if let Some(event) = state.confirm.handle_input(key) {
            state.finish_confirm(event);
        }
        return Ok(false);
    }

    if state.focus == Focus::Search {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c' | 'q')) {
            state.should_quit = true;
            return Ok(true);
        }
        match state.search.handle_input(key) {
            Some(SearchEvent::Changed(query)) => state.set_search(&query),
            Some(SearchEvent::Done) => state.focus_grid(),
            None => {}
        }
        return Ok(false);
    }

    let Some(action) = state.shortcuts.lookup(MAIN_CONTEXT, key) else {
        return Ok(false);
    };
    state.clear_error();

    let columns = state.grid_columns();
    match action {
        Action::NavigateUp => state.grid.move_focus(FocusMove::Up, columns),
        Action::NavigateDown => state.grid.move_focus(FocusMove::Down, columns),
        Action::NavigateLeft => state.grid.move_focus(FocusMove::Left, columns),
        Action::NavigateRight => state.grid.move_focus(FocusMove::Right, columns),
        Action::JumpToFirst => state.grid.move_focus(FocusMove::First, columns),
        Action::JumpToLast => state.grid.move_focus(FocusMove::Last, columns),
        Action::ToggleFocused => state.toggle_focused(),
        Action::SelectAll => state.request_bulk(BulkAction::SelectAll),
        Action::DeselectAll => state.request_bulk(BulkAction::DeselectAll),
        Action::FocusSearch => state.focus_search(),
        Action::ClearSearch => {
            if !state.search.query().is_empty() {
                state.search.clear();
                state.set_search("");
            }
        }
        Action::Quit => {
            state.should_quit = true;
            return Ok(true);
        }
    }

    Ok(false)
}

/// Handle mouse input: clicks and wheel scrolling.
fn handle_mouse_event<S: KeyValueStore>(state: &mut AppState<S>, mouse: MouseEvent) -> Result<()> {
    let (column, row) = (mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {}
        MouseEventKind::ScrollDown if !state.confirm.is_open() => {
            let columns = state.grid_columns();
            state.grid.move_focus(FocusMove::Down, columns);
            return Ok(());
        }
        MouseEventKind::ScrollUp if !state.confirm.is_open() => {
            let columns = state.grid_columns();
            state.grid.move_focus(FocusMove::Up, columns);
            return Ok(());
        }
        _ => return Ok(()),
    }

    if state.confirm.is_open() {
        if let Some(event) = state.confirm.handle_click(state.viewport, column, row) {
            state.finish_confirm(event);
        }
        return Ok(());
    }

    let layout = state.layout();
    if contains(layout.search, column, row) {
        state.focus_search();
    } else if contains(layout.select_all, column, row) {
        state.focus_grid();
        state.request_bulk(BulkAction::SelectAll);
    } else if contains(layout.deselect_all, column, row) {
        state.focus_grid();
        state.request_bulk(BulkAction::DeselectAll);
    } else if let Some(index) = state.grid.card_at(layout.grid, column, row) {
        state.focus_grid();
        state.toggle_card(index);
    } else {
        state.focus_grid();
    }

    Ok(())
}
