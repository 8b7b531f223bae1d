//! Tracker controller: the single owner of session state.
//!
//! Every mutation persists the tracked set, re-renders all cards onto the
//! surface and then re-applies the search filter, so a toggled card can
//! never reappear unfiltered.

use anyhow::{Context, Result};
use tracing::debug;

use crate::models::card::{build_cards, stats_text};
use crate::models::{CardDescriptor, Catalog};
use crate::services::filter::SearchFilter;
use crate::services::tracking::TrackingStore;
use crate::storage::KeyValueStore;

/// Render target for cards.
///
/// The TUI card grid implements this; tests use a recording surface.
pub trait CardSurface {
    /// Replaces the whole card collection with `cards`.
    fn replace_cards(&mut self, cards: Vec<CardDescriptor>);

    /// Shows or hides cards; `visible` is index-aligned with the last `replace_cards` call.
    fn apply_visibility(&mut self, visible: &[bool]);

    /// Updates the stats line.
    fn set_stats(&mut self, stats: String);
}

/// Destructive bulk operations that go through a confirmation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BulkAction {
    /// Track every catalog entry
    SelectAll,
    /// Untrack everything
    DeselectAll,
}

impl BulkAction {
    /// Confirmation dialog title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::SelectAll => "Select All Survivors",
            Self::DeselectAll => "Deselect All Survivors",
        }
    }

    /// Confirmation dialog message.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::SelectAll => "Are you sure you want to mark all survivors as tracked?",
            Self::DeselectAll => "Are you sure you want to untrack all survivors?",
        }
    }
}

/// Owns the catalog, the tracked set and the search filter.
#[derive(Debug)]
pub struct Controller<S: KeyValueStore> {
    catalog: Catalog,
    store: TrackingStore<S>,
    filter: SearchFilter,
}

impl<S: KeyValueStore> Controller<S> {
    /// Loads persisted state from `storage`.
    pub fn new(catalog: Catalog, storage: S) -> Self {
        Self::with_store(catalog, TrackingStore::load(storage))
    }

    /// Wraps an already loaded tracking store.
    pub fn with_store(catalog: Catalog, store: TrackingStore<S>) -> Self {
        Self {
            catalog,
            store,
            filter: SearchFilter::new(),
        }
    }

    /// Draws every card and applies the current filter.
    pub fn refresh(&self, surface: &mut dyn CardSurface) {
        let cards = self.cards();
        let visible = self.filter.visibility(&cards);
        surface.replace_cards(cards);
        surface.set_stats(self.stats_text());
        surface.apply_visibility(&visible);
    }

    /// Toggles `name`, then persists, re-renders and re-filters.
    ///
    /// Returns whether the name is now tracked. The surface is refreshed even
    /// when persisting fails.
    pub fn toggle(&mut self, name: &str, surface: &mut dyn CardSurface) -> Result<bool> {
        let result = self.store.toggle(name);
        self.refresh(surface);
        result.context(format!("Failed to save tracked state for '{name}'"))
    }

    /// Tracks every catalog entry, then persists, re-renders and re-filters.
    pub fn select_all(&mut self, surface: &mut dyn CardSurface) -> Result<()> {
        let result = self.store.select_all(&self.catalog);
        self.refresh(surface);
        result.context("Failed to save tracked survivors")
    }

    /// Untracks everything, then persists, re-renders and re-filters.
    pub fn deselect_all(&mut self, surface: &mut dyn CardSurface) -> Result<()> {
        let result = self.store.deselect_all();
        self.refresh(surface);
        result.context("Failed to save tracked survivors")
    }

    /// Runs a confirmed bulk action.
    pub fn apply(&mut self, action: BulkAction, surface: &mut dyn CardSurface) -> Result<()> {
        debug!(?action, "applying bulk action");
        match action {
            BulkAction::SelectAll => self.select_all(surface),
            BulkAction::DeselectAll => self.deselect_all(surface),
        }
    }

    /// Changes the search text and re-applies visibility without re-rendering.
    pub fn set_search(&mut self, query: impl Into<String>, surface: &mut dyn CardSurface) {
        self.filter.set_query(query);
        let visible: Vec<bool> = self
            .catalog
            .names()
            .iter()
            .map(|name| self.filter.matches(name))
            .collect();
        surface.apply_visibility(&visible);
    }

    /// Card descriptors for the current state, in catalog order.
    #[must_use]
    pub fn cards(&self) -> Vec<CardDescriptor> {
        build_cards(&self.catalog, |name| self.store.is_tracked(name))
    }

    /// Number of tracked catalog entries.
    #[must_use]
    pub fn tracked_count(&self) -> usize {
        self.store.tracked_in(&self.catalog)
    }

    /// `"<tracked> out of <catalog size> survivors tracked"`.
    #[must_use]
    pub fn stats_text(&self) -> String {
        stats_text(self.tracked_count(), self.catalog.len())
    }

    /// The catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The tracking store.
    #[must_use]
    pub fn store(&self) -> &TrackingStore<S> {
        &self.store
    }

    /// The search filter.
    #[must_use]
    pub fn filter(&self) -> &SearchFilter {
        &self.filter
    }
}
