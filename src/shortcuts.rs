//! Centralized shortcut and action system.
//!
//! This module maps key events to actions per input context, so the event
//! handlers and the status bar hints agree on the same bindings.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// All possible actions on the card grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    // === NAVIGATION ===
    /// Move focus one row up
    NavigateUp,
    /// Move focus one row down
    NavigateDown,
    /// Move focus one card left
    NavigateLeft,
    /// Move focus one card right
    NavigateRight,
    /// Focus the first visible card
    JumpToFirst,
    /// Focus the last visible card
    JumpToLast,

    // === TRACKING ===
    /// Toggle the focused card
    ToggleFocused,
    /// Ask to track every survivor
    SelectAll,
    /// Ask to untrack every survivor
    DeselectAll,

    // === SEARCH ===
    /// Move keyboard focus to the search bar
    FocusSearch,
    /// Clear the search text
    ClearSearch,

    // === GENERAL ===
    /// Leave the application
    Quit,
}

impl Action {
    /// Stable identifier, used in logs.
    #[must_use]
    pub const fn id(&self) -> &'static str {
        match self {
            Self::NavigateUp => "navigate_up",
            Self::NavigateDown => "navigate_down",
            Self::NavigateLeft => "navigate_left",
            Self::NavigateRight => "navigate_right",
            Self::JumpToFirst => "jump_first",
            Self::JumpToLast => "jump_last",
            Self::ToggleFocused => "toggle_focused",
            Self::SelectAll => "select_all",
            Self::DeselectAll => "deselect_all",
            Self::FocusSearch => "focus_search",
            Self::ClearSearch => "clear_search",
            Self::Quit => "quit",
        }
    }
}

/// Shortcut registry that maps key events to actions for a given context.
pub struct ShortcutRegistry {
    /// Maps (context, key_binding) to Action
    bindings: HashMap<(&'static str, KeyBinding), Action>,
}

/// A key binding (key + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    /// Key code
    pub code: KeyCode,
    /// Required modifiers
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Create a new key binding.
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Create a key binding from a KeyEvent.
    #[must_use]
    pub const fn from_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers,
        }
    }
}

/// Context name for the card grid.
pub const MAIN_CONTEXT: &str = "main";

impl ShortcutRegistry {
    /// Create a new shortcut registry with default bindings.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Self {
            bindings: HashMap::new(),
        };

        registry.register_main_shortcuts();
        registry
    }

    fn register_main_shortcuts(&mut self) {
        use KeyCode as K;
        use KeyModifiers as M;

        let ctx = MAIN_CONTEXT;

        // === NAVIGATION ===
        self.register(ctx, K::Up, M::NONE, Action::NavigateUp);
        self.register(ctx, K::Down, M::NONE, Action::NavigateDown);
        self.register(ctx, K::Left, M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Right, M::NONE, Action::NavigateRight);
        self.register(ctx, K::Char('k'), M::NONE, Action::NavigateUp);
        self.register(ctx, K::Char('j'), M::NONE, Action::NavigateDown);
        self.register(ctx, K::Char('h'), M::NONE, Action::NavigateLeft);
        self.register(ctx, K::Char('l'), M::NONE, Action::NavigateRight);
        self.register(ctx, K::Home, M::NONE, Action::JumpToFirst);
        self.register(ctx, K::End, M::NONE, Action::JumpToLast);

        // === TRACKING ===
        self.register(ctx, K::Char(' '), M::NONE, Action::ToggleFocused);
        self.register(ctx, K::Enter, M::NONE, Action::ToggleFocused);
        self.register(ctx, K::Char('A'), M::SHIFT, Action::SelectAll);
        self.register(ctx, K::Char('D'), M::SHIFT, Action::DeselectAll);

        // === SEARCH ===
        self.register(ctx, K::Char('/'), M::NONE, Action::FocusSearch);
        self.register(ctx, K::Char('f'), M::CONTROL, Action::FocusSearch);
        self.register(ctx, K::Esc, M::NONE, Action::ClearSearch);

        // === GENERAL ===
        self.register(ctx, K::Char('q'), M::NONE, Action::Quit);
        self.register(ctx, K::Char('q'), M::CONTROL, Action::Quit);
        self.register(ctx, K::Char('c'), M::CONTROL, Action::Quit);
    }

    fn register(
        &mut self,
        context: &'static str,
        code: KeyCode,
        modifiers: KeyModifiers,
        action: Action,
    ) {
        let binding = KeyBinding::new(code, modifiers);
        self.bindings.insert((context, binding), action);
    }

    /// Look up an action for a given context and key event.
    #[must_use]
    pub fn lookup(&self, context: &str, event: KeyEvent) -> Option<Action> {
        let binding = KeyBinding::from_event(event);
        self.bindings
            .iter()
            .find(|((ctx, b), _)| *ctx == context && *b == binding)
            .map(|(_, action)| *action)
    }
}

impl Default for ShortcutRegistry {
    fn default() -> Self {
        Self::new()
    }
}
