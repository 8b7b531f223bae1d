//! Tracked-set persistence service.
//!
//! [`TrackingStore`] owns the in-memory set of tracked survivor names and
//! mirrors it to a [`KeyValueStore`] after every mutation. The persisted
//! value is a JSON array of strings under a single fixed key.

use std::collections::BTreeSet;

use tracing::{debug, info, warn};

use crate::constants::TRACKED_STORAGE_KEY;
use crate::models::Catalog;
use crate::storage::{KeyValueStore, StorageResult};

/// Session source of truth for which names are tracked.
///
/// Names are kept sorted so that serialization is canonical: toggling a name
/// twice writes byte-identical content, and re-saving freshly loaded content
/// does not change it.
#[derive(Debug)]
pub struct TrackingStore<S: KeyValueStore> {
    storage: S,
    key: String,
    tracked: BTreeSet<String>,
}

impl<S: KeyValueStore> TrackingStore<S> {
    /// Loads the tracked set stored under the default key.
    pub fn load(storage: S) -> Self {
        Self::load_with_key(storage, TRACKED_STORAGE_KEY)
    }

    /// Loads the tracked set stored under `key`.
    ///
    /// Never fails: a missing key, unreadable storage, or malformed content
    /// all yield an empty set.
    pub fn load_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let tracked = read_tracked(&storage, &key);
        info!(key = %key, count = tracked.len(), "loaded tracked set");
        Self {
            storage,
            key,
            tracked,
        }
    }

    /// Writes the full set under the store key, replacing prior content.
    pub fn save(&mut self) -> StorageResult<()> {
        let value = serialize_tracked(&self.tracked);
        self.storage.set(&self.key, &value)?;
        debug!(key = %self.key, count = self.tracked.len(), "saved tracked set");
        Ok(())
    }

    /// Flips the tracked state of `name` and saves.
    ///
    /// Returns the new state (`true` when the name is now tracked). The
    /// in-memory change is kept even when the save fails.
    pub fn toggle(&mut self, name: &str) -> StorageResult<bool> {
        let now_tracked = if self.tracked.remove(name) {
            false
        } else {
            self.tracked.insert(name.to_string());
            true
        };
        debug!(name, now_tracked, "toggled");
        self.save()?;
        Ok(now_tracked)
    }

    /// Tracks every catalog member and saves. Stale names are left in place.
    pub fn select_all(&mut self, catalog: &Catalog) -> StorageResult<()> {
        self.tracked.extend(catalog.names().iter().cloned());
        info!(count = self.tracked.len(), "selected all");
        self.save()
    }

    /// Clears the whole set, including names missing from the catalog, and saves.
    pub fn deselect_all(&mut self) -> StorageResult<()> {
        self.tracked.clear();
        info!("deselected all");
        self.save()
    }

    /// Whether `name` is tracked.
    #[must_use]
    pub fn is_tracked(&self, name: &str) -> bool {
        self.tracked.contains(name)
    }

    /// All tracked names, including stale ones.
    #[must_use]
    pub fn tracked(&self) -> &BTreeSet<String> {
        &self.tracked
    }

    /// Size of the tracked set, including stale names.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tracked.len()
    }

    /// Whether nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tracked.is_empty()
    }

    /// Number of catalog members that are tracked.
    #[must_use]
    pub fn tracked_in(&self, catalog: &Catalog) -> usize {
        let mut seen = BTreeSet::new();
        catalog
            .names()
            .iter()
            .filter(|name| self.tracked.contains(name.as_str()) && seen.insert(name.as_str()))
            .count()
    }

    /// Tracked names with no matching catalog entry.
    #[must_use]
    pub fn orphans(&self, catalog: &Catalog) -> Vec<&str> {
        self.tracked
            .iter()
            .filter(|name| !catalog.contains(name))
            .map(String::as_str)
            .collect()
    }

    /// Storage key used by this store.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Backing storage.
    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Consumes the store, returning its backing storage.
    pub fn into_storage(self) -> S {
        self.storage
    }
}

/// Reads the tracked set under `key`, degrading every failure to an empty set.
pub fn read_tracked<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> BTreeSet<String> {
    let raw = match storage.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeSet::new(),
        Err(e) => {
            warn!(key, error = %e, "could not read tracked set, starting empty");
            return BTreeSet::new();
        }
    };

    if raw.trim().is_empty() {
        return BTreeSet::new();
    }

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(names) => names.into_iter().collect(),
        Err(e) => {
            warn!(key, error = %e, "malformed tracked set, starting empty");
            BTreeSet::new()
        }
    }
}

/// Serializes the set as a compact JSON array of strings.
#[must_use]
pub fn serialize_tracked(tracked: &BTreeSet<String>) -> String {
    let names: Vec<&str> = tracked.iter().map(String::as_str).collect();
    // Serializing a slice of &str into a String cannot fail.
    serde_json::to_string(&names).unwrap_or_else(|_| String::from("[]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStore, StorageError};

    fn catalog() -> Catalog {
        Catalog::from_names(["Meg Thomas", "Jake Park", "Nea Karlsson"])
    }

    /// Storage whose reads and writes always fail.
    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> StorageResult<Option<String>> {
            Err(StorageError::Io {
                path: "broken".into(),
                source: std::io::Error::other("disk on fire"),
            })
        }

        fn set(&mut self, _key: &str, _value: &str) -> StorageResult<()> {
            Err(StorageError::Io {
                path: "broken".into(),
                source: std::io::Error::other("disk on fire"),
            })
        }

        fn remove(&mut self, _key: &str) -> StorageResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_load_missing_key_is_empty() {
        let store = TrackingStore::load(MemoryStore::new());
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_malformed_json_is_empty() {
        for raw in ["not json", "{\"a\":1}", "[1,2]", "\"Meg Thomas\"", "[\"Meg"] {
            let storage = MemoryStore::with_entry(TRACKED_STORAGE_KEY, raw);
            let store = TrackingStore::load(storage);
            assert!(store.is_empty(), "expected empty set for {raw:?}");
        }
    }

    #[test]
    fn test_load_unreadable_storage_is_empty() {
        let store = TrackingStore::load(BrokenStore);
        assert!(store.is_empty());
    }

    #[test]
    fn test_load_collapses_duplicates() {
        let storage =
            MemoryStore::with_entry(TRACKED_STORAGE_KEY, r#"["Meg Thomas","Meg Thomas"]"#);
        let store = TrackingStore::load(storage);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toggle_saves_every_time() {
        let mut store = TrackingStore::load(MemoryStore::new());

        assert!(store.toggle("Jake Park").unwrap());
        assert_eq!(
            store.storage().raw(TRACKED_STORAGE_KEY),
            Some(r#"["Jake Park"]"#)
        );

        assert!(!store.toggle("Jake Park").unwrap());
        assert_eq!(store.storage().raw(TRACKED_STORAGE_KEY), Some("[]"));
        assert_eq!(store.storage().write_count(), 2);
    }

    #[test]
    fn test_toggle_twice_is_byte_identical() {
        let storage = MemoryStore::with_entry(
            TRACKED_STORAGE_KEY,
            r#"["Jake Park","Meg Thomas","Nea Karlsson"]"#,
        );
        let mut store = TrackingStore::load(storage);
        store.save().unwrap();
        let before = store.storage().raw(TRACKED_STORAGE_KEY).unwrap().to_string();

        store.toggle("Jake Park").unwrap();
        store.toggle("Jake Park").unwrap();

        assert_eq!(store.storage().raw(TRACKED_STORAGE_KEY).unwrap(), before);
    }

    #[test]
    fn test_save_of_loaded_content_is_noop() {
        let content = r#"["Jake Park","Meg Thomas"]"#;
        let mut store = TrackingStore::load(MemoryStore::with_entry(TRACKED_STORAGE_KEY, content));
        store.save().unwrap();
        assert_eq!(store.storage().raw(TRACKED_STORAGE_KEY), Some(content));
    }

    #[test]
    fn test_select_all_keeps_orphans_and_deselect_all_clears_them() {
        let storage = MemoryStore::with_entry(TRACKED_STORAGE_KEY, r#"["Retired Survivor"]"#);
        let mut store = TrackingStore::load(storage);
        let catalog = catalog();

        store.select_all(&catalog).unwrap();
        assert_eq!(store.tracked_in(&catalog), 3);
        assert_eq!(store.len(), 4);
        assert_eq!(store.orphans(&catalog), vec!["Retired Survivor"]);

        store.deselect_all().unwrap();
        assert!(store.is_empty());
        assert_eq!(store.storage().raw(TRACKED_STORAGE_KEY), Some("[]"));
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let mut store = TrackingStore::load(BrokenStore);
        assert!(store.toggle("Meg Thomas").is_err());
        assert!(store.is_tracked("Meg Thomas"));
    }

    #[test]
    fn test_custom_key() {
        let mut store = TrackingStore::load_with_key(MemoryStore::new(), "otherKey");
        store.toggle("Meg Thomas").unwrap();
        assert_eq!(store.key(), "otherKey");
        assert_eq!(store.storage().raw("otherKey"), Some(r#"["Meg Thomas"]"#));
        assert_eq!(store.storage().raw(TRACKED_STORAGE_KEY), None);
    }
}
