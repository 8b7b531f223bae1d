//! Card descriptors derived from the catalog and the tracked set.
//!
//! Cards are never stored: every render recomputes them from scratch so the
//! visual "tracked" state cannot drift from the tracked set.

use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::constants::{ENTITY_NOUN_PLURAL, PORTRAIT_DIR};
use crate::models::Catalog;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

// ASCII characters other than word characters, whitespace, '-', '(' and ')'.
// Non-ASCII letters such as 'É' are kept.
static ASCII_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[[:ascii:]&&[^A-Za-z0-9_\s\-()]]").expect("punctuation pattern is valid")
});

/// Visual unit representing one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardDescriptor {
    /// Entity name the card is keyed by
    pub name: String,
    /// Whether the crossed-out overlay is shown
    pub tracked: bool,
    /// Relative portrait path, see [`portrait_path`]
    pub image_path: String,
}

/// Derives the filesystem-safe slug for an entity name.
///
/// # Examples
///
/// ```
/// use survivor_tracker::models::card::slugify;
///
/// assert_eq!(slugify("The Troupe (Aestri Yazar)"), "the_troupe__aestri_yazar");
/// ```
#[must_use]
pub fn slugify(name: &str) -> String {
    let underscored = WHITESPACE_RUN.replace_all(name, "_");
    let stripped = ASCII_PUNCTUATION.replace_all(&underscored, "");
    stripped.replace('(', "_").replace(')', "").to_lowercase()
}

/// Relative portrait path for an entity name: `gallery/portraits/<slug>.webp`.
#[must_use]
pub fn portrait_path(name: &str) -> String {
    format!("{PORTRAIT_DIR}/{}.webp", slugify(name))
}

/// Projects the catalog onto card descriptors, one per entry, in catalog order.
pub fn build_cards<F>(catalog: &Catalog, is_tracked: F) -> Vec<CardDescriptor>
where
    F: Fn(&str) -> bool,
{
    catalog
        .names()
        .iter()
        .map(|name| CardDescriptor {
            name: name.clone(),
            tracked: is_tracked(name),
            image_path: portrait_path(name),
        })
        .collect()
}

/// Stats line shown under the search bar.
#[must_use]
pub fn stats_text(tracked: usize, catalog_size: usize) -> String {
    format!("{tracked} out of {catalog_size} {ENTITY_NOUN_PLURAL} tracked")
}
