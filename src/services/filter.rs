//! Case-insensitive substring filter for cards.

use crate::models::CardDescriptor;

/// Whether `name` contains `query`, ignoring case. An empty query matches everything.
#[must_use]
pub fn matches(name: &str, query: &str) -> bool {
    query.is_empty() || name.to_lowercase().contains(&query.to_lowercase())
}

/// Current search text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    query: String,
}

impl SearchFilter {
    /// Creates a filter with no search text.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current search text as typed.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replaces the search text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Whether any search text is set.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Whether a card for `name` should be visible.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        matches(name, &self.query)
    }

    /// Visibility flag per card, index-aligned with `cards`.
    #[must_use]
    pub fn visibility(&self, cards: &[CardDescriptor]) -> Vec<bool> {
        cards.iter().map(|card| self.matches(&card.name)).collect()
    }
}
