use anyhow::{Result, anyhow};
use directories::ProjectDirs;
use std::{
    collections::HashMap,
    fmt::Debug,
    fs,
    path::PathBuf,
    sync::Mutex,
};

/// Key under which the last active location string is persisted.
pub const KEY_LOCATION: &str = "location";

/// Key under which the serialized visit history is persisted.
pub const KEY_LAST_VISITED: &str = "lastVisited";

/// Durable string-keyed storage.
///
/// Storage trouble is absorbed here, never propagated: a failed read behaves
/// as "no value" and a failed write is a logged no-op. Callers can treat the
/// store as infallible.
pub trait KeyValueStore: Send + Sync + Debug {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// File-backed store: a flat TOML table of strings under the platform data
/// directory.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<HashMap<String, String>>,
}

impl FileStore {
    /// Open the store at the platform-default location.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(Self::state_file_path()?))
    }

    /// Open the store backed by `path`. A missing or unreadable file starts
    /// empty; a malformed file is discarded with a warning.
    pub fn open(path: PathBuf) -> Self {
        let entries = match fs::read_to_string(&path) {
            Ok(contents) => match toml::from_str::<HashMap<String, String>>(&contents) {
                Ok(map) => map,
                Err(err) => {
                    tracing::warn!(path = %path.display(), %err, "discarding malformed state file");
                    HashMap::new()
                }
            },
            Err(_) => HashMap::new(),
        };

        Self { path, entries: Mutex::new(entries) }
    }

    /// Path to the state file.
    pub fn state_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "getweath", "getweath")
            .ok_or_else(|| anyhow!("Could not determine platform data directory"))?;

        Ok(dirs.data_dir().join("state.toml"))
    }

    fn flush(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            if let Err(err) = fs::create_dir_all(parent) {
                tracing::warn!(path = %parent.display(), %err, "could not create state directory");
                return;
            }
        }

        let serialized = match toml::to_string_pretty(entries) {
            Ok(s) => s,
            Err(err) => {
                tracing::warn!(%err, "could not serialize state");
                return;
            }
        };

        if let Err(err) = fs::write(&self.path, serialized) {
            tracing::warn!(path = %self.path.display(), %err, "could not write state file");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) {
        let Ok(mut entries) = self.entries.lock() else { return };
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries);
    }
}

/// In-memory store, used in tests and as a fallback when no data directory
/// can be resolved.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.entries.lock() {
            Ok(entries) => entries.get(key).cloned(),
            Err(_) => None,
        }
    }

    fn set(&self, key: &str, value: &str) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), value.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_then_get() {
        let store = MemoryStore::default();
        assert_eq!(store.get(KEY_LOCATION), None);

        store.set(KEY_LOCATION, "Lucknow");
        assert_eq!(store.get(KEY_LOCATION).as_deref(), Some("Lucknow"));
    }

    #[test]
    fn file_store_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.toml");

        let store = FileStore::open(path.clone());
        store.set(KEY_LOCATION, "Tokyo");
        store.set(KEY_LAST_VISITED, r#"["Tokyo","Paris"]"#);

        let reopened = FileStore::open(path);
        assert_eq!(reopened.get(KEY_LOCATION).as_deref(), Some("Tokyo"));
        assert_eq!(reopened.get(KEY_LAST_VISITED).as_deref(), Some(r#"["Tokyo","Paris"]"#));
    }

    #[test]
    fn file_store_missing_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = FileStore::open(dir.path().join("nope.toml"));
        assert_eq!(store.get(KEY_LOCATION), None);
    }

    #[test]
    fn file_store_malformed_file_starts_empty() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("state.toml");
        std::fs::write(&path, "not [valid toml").expect("write");

        let store = FileStore::open(path);
        assert_eq!(store.get(KEY_LOCATION), None);
    }

    #[test]
    fn file_store_write_failure_is_absorbed() {
        let dir = tempfile::tempdir().expect("tempdir");
        // Parent "dir" of the state file is a regular file, so the write must fail.
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, "").expect("write");
        let store = FileStore::open(blocker.join("state.toml"));

        store.set(KEY_LOCATION, "Paris");
        // The value still lives in the in-process cache.
        assert_eq!(store.get(KEY_LOCATION).as_deref(), Some("Paris"));
    }
}
