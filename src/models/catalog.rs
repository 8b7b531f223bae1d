//! The fixed, ordered list of trackable survivors.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Built-in survivor roster, in display order.
pub const BUILTIN_SURVIVORS: [&str; 48] = [
    "Dwight Fairfield",
    "Meg Thomas",
    "Claudette Morel",
    "Jake Park",
    "Nea Karlsson",
    "Laurie Strode",
    "Ace Visconti",
    "Bill Overbeck",
    "Feng Min",
    "David King",
    "David Tapp",
    "Kate Denson",
    "Adam Francis",
    "Jeff Johansen",
    "Jane Romero",
    "Ash Williams",
    "Nancy Wheeler",
    "Steve Harrington",
    "Yui Kimura",
    "Zarina Kassir",
    "Cheryl Mason",
    "Felix Richter",
    "Élodie Rakoto",
    "Yun-Jin Lee",
    "Jill Valentine",
    "Leon S. Kennedy",
    "Mikaela Reid",
    "Jonah Vasquez",
    "Yoichi Asakawa",
    "Haddie Kaur",
    "Ada Wong",
    "Rebecca Chambers",
    "Vittorio Toscano",
    "Thalita Lyra",
    "Renato Lyra",
    "Gabriel Soma",
    "Nicolas Cage",
    "Ellen Ripley",
    "Alan Wake",
    "Sable Ward",
    "Orela Rose",
    "The Troupe (Aestri Yazar)",
    "The Troupe (Baermar Uraz)",
    "Lara Croft",
    "Trevor Belmont",
    "Taurie Cain",
    "Rick Grimes",
    "Michonne Grimes",
];

/// Ordered, immutable sequence of entity names.
///
/// Duplicates are not rejected; a duplicated name yields two cards that
/// share one tracked state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    names: Vec<String>,
}

/// On-disk shape of a custom catalog file.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    names: Vec<String>,
}

impl Catalog {
    /// Creates the built-in survivor catalog.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            names: BUILTIN_SURVIVORS.iter().map(|s| (*s).to_string()).collect(),
        }
    }

    /// Creates a catalog from arbitrary names, keeping their order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Loads a catalog from a TOML file of the form `names = ["A", "B"]`.
    ///
    /// Names are trimmed. Blank names and empty catalogs are rejected.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read catalog file: {}", path.display()))?;
        let file: CatalogFile = toml::from_str(&content)
            .context(format!("Failed to parse catalog file: {}", path.display()))?;

        let mut names = Vec::with_capacity(file.names.len());
        for (index, raw) in file.names.iter().enumerate() {
            let name = raw.trim();
            if name.is_empty() {
                anyhow::bail!(
                    "Catalog file {} has a blank name at position {}",
                    path.display(),
                    index + 1
                );
            }
            names.push(name.to_string());
        }

        if names.is_empty() {
            anyhow::bail!("Catalog file {} contains no names", path.display());
        }

        Ok(Self { names })
    }

    /// Names in catalog order.
    #[must_use]
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Whether `name` is a catalog member (exact match).
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Finds a catalog member by case-insensitive name.
    #[must_use]
    pub fn find_ignore_case(&self, name: &str) -> Option<&str> {
        let needle = name.trim().to_lowercase();
        self.names
            .iter()
            .find(|n| n.to_lowercase() == needle)
            .map(String::as_str)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::builtin()
    }
}
