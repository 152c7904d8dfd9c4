use anyhow::{anyhow, Result};
use reelist_models::WatchedMovie;
use serde::{de::DeserializeOwned, Serialize};
use std::path::PathBuf;
use tracing::{debug, warn};

/// Durable slot for the watch-list: one JSON file, whole-value reads and
/// writes. No partial writes, no migration, no schema versioning.
#[derive(Clone)]
pub struct WatchlistStore {
    path: PathBuf,
}

impl WatchlistStore {
    pub fn new(path: PathBuf) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        Ok(Self { path })
    }

    /// Load the persisted list, called once at startup. An absent file
    /// yields the empty list; a malformed one is warned about and treated
    /// the same (the next save overwrites it).
    pub fn load(&self) -> Vec<WatchedMovie> {
        self.load_value()
    }

    /// Persist the full list. Called on every transition; always a
    /// whole-value overwrite.
    pub fn save(&self, list: &[WatchedMovie]) -> Result<()> {
        self.save_value(list)
    }

    fn load_value<T>(&self) -> T
    where
        T: DeserializeOwned + Default,
    {
        if !self.path.exists() {
            debug!("no watch-list file at {}, starting empty", self.path.display());
            return T::default();
        }

        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(value) => value,
                Err(e) => {
                    warn!(
                        "watch-list file {} is malformed ({}), starting empty",
                        self.path.display(),
                        e
                    );
                    T::default()
                }
            },
            Err(e) => {
                warn!("failed to read {}: {}, starting empty", self.path.display(), e);
                T::default()
            }
        }
    }

    fn save_value<T>(&self, value: &T) -> Result<()>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| anyhow!("failed to serialize watch-list: {}", e))?;
        std::fs::write(&self.path, json)
            .map_err(|e| anyhow!("failed to write {}: {}", self.path.display(), e))?;
        debug!("watch-list saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use tempfile::TempDir;

    fn create_watched(imdb_id: &str) -> WatchedMovie {
        WatchedMovie {
            imdb_id: imdb_id.to_string(),
            title: "Movie".to_string(),
            year: Some("2020".to_string()),
            poster_url: Some("https://img/p.jpg".to_string()),
            imdb_rating: 7.5,
            runtime_minutes: 120,
            user_rating: 8,
            rewatch_count: 1,
            rewatch_comments: vec!["still good".to_string()],
            date_added: Utc::now(),
        }
    }

    #[test]
    fn test_round_trip() {
        let dir = TempDir::new().unwrap();
        let store = WatchlistStore::new(dir.path().join("watched.json")).unwrap();

        let list = vec![create_watched("tt1"), create_watched("tt2")];
        store.save(&list).unwrap();

        let loaded = store.load();
        assert_eq!(loaded, list);
    }

    #[test]
    fn test_missing_file_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let store = WatchlistStore::new(dir.path().join("watched.json")).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_malformed_file_yields_empty_list() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watched.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = WatchlistStore::new(path).unwrap();
        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_overwrites_whole_value() {
        let dir = TempDir::new().unwrap();
        let store = WatchlistStore::new(dir.path().join("watched.json")).unwrap();

        store.save(&[create_watched("tt1"), create_watched("tt2")]).unwrap();
        store.save(&[create_watched("tt3")]).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].imdb_id, "tt3");
    }
}
