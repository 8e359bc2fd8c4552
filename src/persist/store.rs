use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

/// A flat, synchronous key/value medium (think browser local storage).
///
/// Writes are fire-and-forget: implementations log I/O problems instead of
/// returning them.
pub trait StateStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: String);
    fn remove(&mut self, key: &str);
    fn keys(&self) -> Vec<String>;

    /// Remove every key starting with `prefix`.
    fn remove_prefix(&mut self, prefix: &str) {
        for key in self.keys() {
            if key.starts_with(prefix) {
                self.remove(&key);
            }
        }
    }
}

impl<T: StateStore + ?Sized> StateStore for Box<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: String) {
        (**self).set(key, value);
    }

    fn remove(&mut self, key: &str) {
        (**self).remove(key);
    }

    fn keys(&self) -> Vec<String> {
        (**self).keys()
    }
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Session-scoped store; gone when the process exits.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StateStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        self.entries.insert(key.to_owned(), value);
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}

// ---------------------------------------------------------------------------
// File-backed store
// ---------------------------------------------------------------------------

/// A JSON object on disk, rewritten after every mutation.
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    /// Open (or lazily create) the store at `path`.
    ///
    /// A missing file starts empty. So does an unreadable or corrupt one,
    /// with a warning: stale state must never stop the dashboard from
    /// starting.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|e| {
                tracing::warn!("state: ignoring corrupt {}: {e}", path.display());
                BTreeMap::new()
            }),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!("state: cannot read {}: {e}", path.display());
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) {
        if let Some(parent) = self.path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            tracing::warn!("state: cannot create {}: {e}", parent.display());
            return;
        }
        let json = match serde_json::to_string_pretty(&self.entries) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!("state: cannot serialize state: {e}");
                return;
            }
        };
        if let Err(e) = std::fs::write(&self.path, json) {
            tracing::warn!("state: cannot write {}: {e}", self.path.display());
        }
    }
}

impl StateStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: String) {
        if self.entries.get(key) == Some(&value) {
            return;
        }
        self.entries.insert(key.to_owned(), value);
        self.flush();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.flush();
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }
}
