//! Persistence port: named JSON snapshots on disk.
//!
//! One `<key>.json` file per logical key under a data directory. Loading
//! substitutes the caller's default when the file is missing or fails to
//! parse, so callers never observe a corrupt snapshot. Saving is
//! fire-and-forget: failures are logged and swallowed.

use crate::models::Tournament;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Snapshot key: the registered teams.
pub const KEY_TEAMS: &str = "teams";
/// Snapshot key: the match tree, absent if never generated.
pub const KEY_BRACKET: &str = "bracket";
/// Snapshot key: recorded results by match id.
pub const KEY_RESULTS: &str = "results";
/// Snapshot key: the registered organizer account (used by the web layer).
pub const KEY_ADMIN_USER: &str = "admin_user";

/// Key-value snapshot store backed by one JSON file per key.
pub struct SnapshotStore {
    dir: PathBuf,
}

impl SnapshotStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub fn open(dir: impl Into<PathBuf>) -> io::Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }

    /// Load the value stored under `key`, or `default` when the file is
    /// absent or does not parse.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        let path = self.path_for(key);
        let data = match fs::read_to_string(&path) {
            Ok(d) => d,
            Err(_) => return default,
        };
        match serde_json::from_str(&data) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("Ignoring corrupt snapshot {}: {}", path.display(), e);
                default
            }
        }
    }

    /// Save `value` under `key`. Failures are logged, never returned.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        let payload = match serde_json::to_string_pretty(value) {
            Ok(p) => p,
            Err(e) => {
                log::warn!("Failed to serialize snapshot {key}: {e}");
                return;
            }
        };
        let path = self.path_for(key);
        if let Err(e) = fs::write(&path, payload) {
            log::warn!("Failed to write snapshot {}: {}", path.display(), e);
        }
    }
}

/// Load the full tournament snapshot. The three stores are read together
/// so the in-memory state is always one consistent generation.
pub fn load_tournament(store: &SnapshotStore) -> Tournament {
    Tournament {
        teams: store.load(KEY_TEAMS, Vec::new()),
        bracket: store.load(KEY_BRACKET, None),
        results: store.load(KEY_RESULTS, HashMap::new()),
    }
}

/// Save the full tournament snapshot, all stores together.
pub fn save_tournament(store: &SnapshotStore, tournament: &Tournament) {
    store.save(KEY_TEAMS, &tournament.teams);
    store.save(KEY_BRACKET, &tournament.bracket);
    store.save(KEY_RESULTS, &tournament.results);
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn temp_store() -> (SnapshotStore, PathBuf) {
        let dir = std::env::temp_dir().join(format!("interclass-store-{}", Uuid::new_v4()));
        (SnapshotStore::open(&dir).unwrap(), dir)
    }

    #[test]
    fn missing_key_returns_default() {
        let (store, dir) = temp_store();
        let teams: Vec<String> = store.load("nope", Vec::new());
        assert!(teams.is_empty());
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn corrupt_file_returns_default() {
        let (store, dir) = temp_store();
        fs::write(dir.join("teams.json"), "{ not json").unwrap();
        let teams: Vec<String> = store.load(KEY_TEAMS, vec!["fallback".to_string()]);
        assert_eq!(teams, vec!["fallback".to_string()]);
        let _ = fs::remove_dir_all(dir);
    }

    #[test]
    fn saved_tournament_loads_back() {
        let (store, dir) = temp_store();
        let mut t = Tournament::new();
        t.add_team("Blue", "Ana", vec!["Rui".to_string()]).unwrap();
        save_tournament(&store, &t);
        let loaded = load_tournament(&store);
        assert_eq!(loaded.teams, t.teams);
        assert!(loaded.bracket.is_none());
        let _ = fs::remove_dir_all(dir);
    }
}
