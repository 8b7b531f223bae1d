//! Generic yes/no confirmation modal.
//!
//! The dialog holds at most one pending action. Showing it again replaces
//! the pending action, so confirming always runs exactly the most recent
//! request, once.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::component::Component;
use super::Theme;

const DIALOG_WIDTH: u16 = 64;
const DIALOG_HEIGHT: u16 = 9;
const CONFIRM_LABEL: &str = "[ Confirm ]";
const CANCEL_LABEL: &str = "[ Cancel ]";

/// Which dialog button has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmButton {
    /// Runs the pending action
    Confirm,
    /// Dismisses the dialog
    Cancel,
}

/// Event emitted when the dialog closes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmEvent<A> {
    /// The user confirmed; run the action
    Confirmed(A),
    /// The user cancelled or clicked outside the dialog
    Cancelled,
}

#[derive(Debug, Clone)]
struct Pending<A> {
    title: String,
    message: String,
    action: A,
    selected: ConfirmButton,
}

/// Screen regions of an open dialog, used for drawing and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogLayout {
    /// Whole dialog body including its border
    pub body: Rect,
    /// Message area
    pub message: Rect,
    /// Confirm button
    pub confirm: Rect,
    /// Cancel button
    pub cancel: Rect,
}

impl DialogLayout {
    /// Computes the dialog layout centered in `area`.
    #[must_use]
    pub fn compute(area: Rect) -> Self {
        let width = DIALOG_WIDTH.min(area.width);
        let height = DIALOG_HEIGHT.min(area.height);
        let body = Rect::new(
            area.x + (area.width - width) / 2,
            area.y + (area.height - height) / 2,
            width,
            height,
        );

        let inner_x = body.x.saturating_add(2);
        let inner_width = body.width.saturating_sub(4);
        let message = Rect::new(
            inner_x,
            body.y.saturating_add(2),
            inner_width,
            body.height.saturating_sub(5),
        );

        let buttons_y = (body.y + body.height).saturating_sub(2);
        let middle = body.x + body.width / 2;
        let confirm_width = CONFIRM_LABEL.len() as u16;
        let cancel_width = CANCEL_LABEL.len() as u16;
        let confirm = Rect::new(
            middle.saturating_sub(confirm_width + 1).max(body.x),
            buttons_y,
            confirm_width.min(body.width),
            1,
        );
        let cancel = Rect::new(
            (middle + 2).min((body.x + body.width).saturating_sub(cancel_width)),
            buttons_y,
            cancel_width.min(body.width),
            1,
        );

        Self {
            body,
            message,
            confirm,
            cancel,
        }
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x && column < rect.x + rect.width && row >= rect.y && row < rect.y + rect.height
}

/// Two-button modal gating an action of type `A`.
#[derive(Debug, Clone)]
pub struct ConfirmDialog<A> {
    pending: Option<Pending<A>>,
}

impl<A> Default for ConfirmDialog<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A: Clone> ConfirmDialog<A> {
    /// Creates a closed dialog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the dialog for `action`, replacing any action already pending.
    pub fn show(&mut self, title: impl Into<String>, message: impl Into<String>, action: A) {
        self.pending = Some(Pending {
            title: title.into(),
            message: message.into(),
            action,
            selected: ConfirmButton::Cancel,
        });
    }

    /// Whether the dialog is visible.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Title of the open dialog.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.title.as_str())
    }

    /// Message of the open dialog.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.pending.as_ref().map(|p| p.message.as_str())
    }

    /// The action that confirming would run.
    #[must_use]
    pub fn pending_action(&self) -> Option<&A> {
        self.pending.as_ref().map(|p| &p.action)
    }

    /// Button with keyboard focus.
    #[must_use]
    pub fn selected(&self) -> Option<ConfirmButton> {
        self.pending.as_ref().map(|p| p.selected)
    }

    /// Closes the dialog and hands back the pending action.
    pub fn confirm(&mut self) -> Option<ConfirmEvent<A>> {
        self.pending
            .take()
            .map(|pending| ConfirmEvent::Confirmed(pending.action))
    }

    /// Closes the dialog without running anything.
    pub fn cancel(&mut self) -> Option<ConfirmEvent<A>> {
        self.pending.take().map(|_| ConfirmEvent::Cancelled)
    }

    /// Handles a left click at (`column`, `row`) with the dialog drawn in `area`.
    ///
    /// Clicking outside the dialog body cancels; clicking the body itself
    /// (but not a button) does nothing.
    pub fn handle_click(&mut self, area: Rect, column: u16, row: u16) -> Option<ConfirmEvent<A>> {
        if !self.is_open() {
            return None;
        }

        let layout = DialogLayout::compute(area);
        if contains(layout.confirm, column, row) {
            self.confirm()
        } else if contains(layout.cancel, column, row) || !contains(layout.body, column, row) {
            self.cancel()
        } else {
            None
        }
    }

    fn toggle_selection(&mut self) {
        if let Some(pending) = self.pending.as_mut() {
            pending.selected = match pending.selected {
                ConfirmButton::Confirm => ConfirmButton::Cancel,
                ConfirmButton::Cancel => ConfirmButton::Confirm,
            };
        }
    }
}

impl<A: Clone> Component for ConfirmDialog<A> {
    type Event = ConfirmEvent<A>;

    fn handle_input(&mut self, key: KeyEvent) -> Option<Self::Event> {
        let selected = self.selected()?;

        match key.code {
            KeyCode::Char('y' | 'Y') => self.confirm(),
            KeyCode::Char('n' | 'N') | KeyCode::Esc => self.cancel(),
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.cancel(),
            KeyCode::Left | KeyCode::Right | KeyCode::Tab | KeyCode::BackTab => {
                self.toggle_selection();
                None
            }
            KeyCode::Enter => match selected {
                ConfirmButton::Confirm => self.confirm(),
                ConfirmButton::Cancel => self.cancel(),
            },
            _ => None,
        }
    }

    fn render(&self, f: &mut Frame, area: Rect, theme: &Theme) {
        let Some(pending) = self.pending.as_ref() else {
            return;
        };
        let layout = DialogLayout::compute(area);

        f.render_widget(Clear, layout.body);
        let block = Block::default()
            .title(format!(" {} ", pending.title))
            .borders(Borders::ALL)
            .style(Style::default().fg(theme.warning).bg(theme.background));
        f.render_widget(block, layout.body);

        let message = Paragraph::new(pending.message.as_str())
            .style(Style::default().fg(theme.text))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(message, layout.message);

        let button_style = |button: ConfirmButton, color: Color| {
            let base = Style::default().fg(color).bg(theme.surface);
            if pending.selected == button {
                base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                base
            }
        };

        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                CONFIRM_LABEL,
                button_style(ConfirmButton::Confirm, theme.error),
            ))),
            layout.confirm,
        );
        f.render_widget(
            Paragraph::new(Line::from(Span::styled(
                CANCEL_LABEL,
                button_style(ConfirmButton::Cancel, theme.text),
            ))),
            layout.cancel,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Op {
        First,
        Second,
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    const SCREEN: Rect = Rect {
        x: 0,
        y: 0,
        width: 100,
        height: 40,
    };

    #[test]
    fn test_show_twice_confirms_once() {
        let mut dialog = ConfirmDialog::new();
        dialog.show("Title", "Message", Op::First);
        dialog.show("Title", "Message", Op::First);

        assert_eq!(
            dialog.handle_input(key(KeyCode::Char('y'))),
            Some(ConfirmEvent::Confirmed(Op::First))
        );
        assert!(!dialog.is_open());
        // A second confirm has nothing left to run
        assert_eq!(dialog.handle_input(key(KeyCode::Char('y'))), None);
        assert_eq!(dialog.confirm(), None);
    }

    #[test]
    fn test_reshow_replaces_pending_action() {
        let mut dialog = ConfirmDialog::new();
        dialog.show("One", "first", Op::First);
        dialog.show("Two", "second", Op::Second);

        assert_eq!(dialog.title(), Some("Two"));
        assert_eq!(dialog.message(), Some("second"));
        assert_eq!(dialog.confirm(), Some(ConfirmEvent::Confirmed(Op::Second)));
    }

    #[test]
    fn test_escape_cancels_without_action() {
        let mut dialog = ConfirmDialog::new();
        dialog.show("Title", "Message", Op::First);

        assert_eq!(
            dialog.handle_input(key(KeyCode::Esc)),
            Some(ConfirmEvent::Cancelled)
        );
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_enter_follows_selected_button() {
        let mut dialog = ConfirmDialog::new();
        dialog.show("Title", "Message", Op::First);
        assert_eq!(dialog.selected(), Some(ConfirmButton::Cancel));
        assert_eq!(
            dialog.handle_input(key(KeyCode::Enter)),
            Some(ConfirmEvent::Cancelled)
        );

        dialog.show("Title", "Message", Op::First);
        assert_eq!(dialog.handle_input(key(KeyCode::Left)), None);
        assert_eq!(dialog.selected(), Some(ConfirmButton::Confirm));
        assert_eq!(
            dialog.handle_input(key(KeyCode::Enter)),
            Some(ConfirmEvent::Confirmed(Op::First))
        );
    }

    #[test]
    fn test_click_outside_cancels() {
        let mut dialog = ConfirmDialog::new();
        dialog.show("Title", "Message", Op::First);

        assert_eq!(
            dialog.handle_click(SCREEN, 0, 0),
            Some(ConfirmEvent::Cancelled)
        );
        assert!(!dialog.is_open());
    }

    #[test]
    fn test_click_on_body_is_ignored() {
        let mut dialog = ConfirmDialog::new();
        dialog.show("Title", "Message", Op::First);
        let layout = DialogLayout::compute(SCREEN);

        assert_eq!(
            dialog.handle_click(SCREEN, layout.message.x, layout.message.y),
            None
        );
        assert!(dialog.is_open());
    }

    #[test]
    fn test_click_buttons() {
        let layout = DialogLayout::compute(SCREEN);
        let mut dialog = ConfirmDialog::new();

        dialog.show("Title", "Message", Op::Second);
        assert_eq!(
            dialog.handle_click(SCREEN, layout.confirm.x, layout.confirm.y),
            Some(ConfirmEvent::Confirmed(Op::Second))
        );

        dialog.show("Title", "Message", Op::Second);
        assert_eq!(
            dialog.handle_click(SCREEN, layout.cancel.x + 1, layout.cancel.y),
            Some(ConfirmEvent::Cancelled)
        );
    }

    #[test]
    fn test_layout_buttons_do_not_overlap() {
        let layout = DialogLayout::compute(SCREEN);
        assert!(layout.confirm.x + layout.confirm.width <= layout.cancel.x);
        assert_eq!(layout.confirm.y, layout.cancel.y);
        assert!(contains(layout.body, layout.confirm.x, layout.confirm.y));
        assert!(contains(layout.body, layout.cancel.x, layout.cancel.y));
    }

    #[test]
    fn test_closed_dialog_ignores_input() {
        let mut dialog: ConfirmDialog<Op> = ConfirmDialog::new();
        assert_eq!(dialog.handle_input(key(KeyCode::Char('y'))), None);
        assert_eq!(dialog.handle_click(SCREEN, 0, 0), None);
    }
}
