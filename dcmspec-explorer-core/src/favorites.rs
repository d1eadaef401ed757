//! Persistent favorites list.
//!
//! Favorites are IOD table ids, stored as `favorites.json` next to the
//! active config file. A missing or unreadable file means an empty set;
//! every mutation rewrites the whole file through a temp-file rename so a
//! crash cannot leave a half-written list behind.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::IodEntry;
use crate::Result;

pub const FAVORITES_FILE_NAME: &str = "favorites.json";

#[derive(Debug, Serialize, Deserialize)]
struct FavoritesFile {
    #[serde(default)]
    favorites: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    last_updated: Option<String>,
}

/// In-memory favorites set with explicit load/save boundaries.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    favorites: BTreeSet<String>,
}

impl FavoritesStore {
    /// Load favorites from `favorites.json` under `data_dir`.
    ///
    /// An absent file yields an empty set. A corrupt file is logged and
    /// treated as empty; it gets overwritten on the next save.
    pub fn load(data_dir: &Path) -> Self {
        let path = data_dir.join(FAVORITES_FILE_NAME);
        let favorites = match fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str::<FavoritesFile>(&content) {
                Ok(file) => file.favorites.into_iter().collect(),
                Err(err) => {
                    tracing::warn!("Failed to parse {}: {err}; starting empty", path.display());
                    BTreeSet::new()
                }
            },
            Err(_) => BTreeSet::new(),
        };
        Self { path, favorites }
    }

    pub fn is_favorite(&self, table_id: &str) -> bool {
        self.favorites.contains(table_id)
    }

    pub fn favorites(&self) -> impl Iterator<Item = &str> {
        self.favorites.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    /// Add a table id and persist. No-op rewrite if already present.
    pub fn add(&mut self, table_id: &str) -> Result<()> {
        self.favorites.insert(table_id.to_string());
        self.save()?;
        tracing::info!("Added favorite: {table_id}");
        Ok(())
    }

    /// Remove a table id and persist. Removing an absent id is not an error.
    pub fn remove(&mut self, table_id: &str) -> Result<()> {
        self.favorites.remove(table_id);
        self.save()?;
        tracing::info!("Removed favorite: {table_id}");
        Ok(())
    }

    /// Flip the favorite state of a table id; returns the new state.
    pub fn toggle(&mut self, table_id: &str) -> Result<bool> {
        if self.is_favorite(table_id) {
            self.remove(table_id)?;
            Ok(false)
        } else {
            self.add(table_id)?;
            Ok(true)
        }
    }

    /// Keep only the entries whose table id is a favorite.
    pub fn filter_entries<'a>(&self, entries: &'a [IodEntry]) -> Vec<&'a IodEntry> {
        entries
            .iter()
            .filter(|entry| self.is_favorite(&entry.table_id))
            .collect()
    }

    fn save(&self) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            fs::create_dir_all(dir)?;
        }
        let file = FavoritesFile {
            favorites: self.favorites.iter().cloned().collect(),
            last_updated: Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.6f").to_string()),
        };
        let json = serde_json::to_string_pretty(&file)?;

        // Write-then-rename keeps the on-disk list whole even if we die
        // mid-write.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IodKind;
    use tempfile::tempdir;

    fn entry(name: &str, table_id: &str) -> IodEntry {
        IodEntry {
            name: name.to_string(),
            table_id: table_id.to_string(),
            table_url: format!("https://example.org/part03.html#{table_id}"),
            kind: IodKind::classify(table_id),
        }
    }

    #[test]
    fn missing_file_is_an_empty_set() {
        let dir = tempdir().unwrap();
        let store = FavoritesStore::load(dir.path());
        assert!(store.is_empty());
    }

    #[test]
    fn corrupt_file_is_an_empty_set() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join(FAVORITES_FILE_NAME), "not json at all").unwrap();
        let store = FavoritesStore::load(dir.path());
        assert!(store.is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let mut store = FavoritesStore::load(dir.path());
        store.add("table_A.49-1").unwrap();
        store.add("table_B.26.2-1").unwrap();

        let reloaded = FavoritesStore::load(dir.path());
        assert_eq!(
            reloaded.favorites().collect::<Vec<_>>(),
            vec!["table_A.49-1", "table_B.26.2-1"]
        );
    }

    #[test]
    fn toggle_twice_restores_original_set() {
        let dir = tempdir().unwrap();
        let mut store = FavoritesStore::load(dir.path());
        store.add("table_A.3-1").unwrap();
        let before: Vec<String> = store.favorites().map(String::from).collect();

        assert!(store.toggle("table_A.49-1").unwrap());
        assert!(!store.toggle("table_A.49-1").unwrap());

        let after: Vec<String> = store.favorites().map(String::from).collect();
        assert_eq!(before, after);

        let reloaded = FavoritesStore::load(dir.path());
        assert_eq!(reloaded.favorites().map(String::from).collect::<Vec<_>>(), before);
    }

    #[test]
    fn duplicate_add_keeps_set_semantics() {
        let dir = tempdir().unwrap();
        let mut store = FavoritesStore::load(dir.path());
        store.add("table_A.49-1").unwrap();
        store.add("table_A.49-1").unwrap();
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn filter_entries_keeps_only_favorites() {
        let dir = tempdir().unwrap();
        let mut store = FavoritesStore::load(dir.path());
        store.add("table_A.49-1").unwrap();

        let entries = vec![entry("CT Image", "table_A.3-1"), entry("US Image", "table_A.49-1")];
        let filtered = store.filter_entries(&entries);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].table_id, "table_A.49-1");
    }

    #[test]
    fn save_writes_last_updated_and_no_temp_file_remains() {
        let dir = tempdir().unwrap();
        let mut store = FavoritesStore::load(dir.path());
        store.add("table_A.49-1").unwrap();

        let content = fs::read_to_string(dir.path().join(FAVORITES_FILE_NAME)).unwrap();
        let file: FavoritesFile = serde_json::from_str(&content).unwrap();
        assert!(file.last_updated.is_some());
        assert!(!dir.path().join("favorites.json.tmp").exists());
    }
}
