//! JSON-over-strings key-value store used by every client feature.
//!
//! Reads never fail: a missing key, unparseable text, or a stored `null` all
//! yield the caller's fallback. Writes replace the whole value.

use crate::errors::StoreError;
use serde::{Serialize, de::DeserializeOwned};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};
use tracing::error;

pub const EXERCISES_KEY: &str = "reva:exercises";
pub const COMPLETED_KEY: &str = "reva:exercises:completed";
pub const TRACKING_KEY: &str = "reva:tracking";
pub const PRODUCTS_KEY: &str = "reva:products";
pub const CART_KEY: &str = "reva:cart";
pub const WISHLIST_KEY: &str = "reva:wishlist";
pub const FORMS_KEY: &str = "reva:forms";
pub const CHAT_HISTORY_KEY: &str = "reva:chat:history";

/// Raw string storage, the equivalent of a browser's local storage.
pub trait KeyValueBackend: Send + Sync {
    fn get_raw(&self, key: &str) -> Option<String>;
    fn set_raw(&self, key: &str, value: String);
    fn remove(&self, key: &str);
    fn clear(&self);
}

#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueBackend for MemoryBackend {
    fn get_raw(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: String) {
        lock(&self.entries).insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        lock(&self.entries).remove(key);
    }

    fn clear(&self) {
        lock(&self.entries).clear();
    }
}

/// Keeps every key in one JSON file, rewritten after each mutation.
#[derive(Debug)]
pub struct FileBackend {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileBackend {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match load_entries(&path) {
            Ok(entries) => entries,
            Err(StoreError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                BTreeMap::new()
            }
            Err(err) => {
                error!(path = %path.display(), "{err}");
                BTreeMap::new()
            }
        };

        Self {
            path,
            entries: Mutex::new(entries),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        if let Err(err) = persist_entries(&self.path, entries) {
            error!(path = %self.path.display(), "failed to write store file: {err}");
        }
    }
}

impl KeyValueBackend for FileBackend {
    fn get_raw(&self, key: &str) -> Option<String> {
        lock(&self.entries).get(key).cloned()
    }

    fn set_raw(&self, key: &str, value: String) {
        let mut entries = lock(&self.entries);
        entries.insert(key.to_string(), value);
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = lock(&self.entries);
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }

    fn clear(&self) {
        let mut entries = lock(&self.entries);
        entries.clear();
        self.persist(&entries);
    }
}

fn load_entries(path: &Path) -> Result<BTreeMap<String, String>, StoreError> {
    let bytes = std::fs::read(path)?;
    Ok(serde_json::from_slice(&bytes)?)
}

fn persist_entries(path: &Path, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let payload = serde_json::to_vec_pretty(entries)?;
    std::fs::write(path, payload)?;
    Ok(())
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Typed view over a [`KeyValueBackend`]. Cloning shares the backend.
pub struct LocalStore<B> {
    backend: Arc<B>,
}

impl<B> Clone for LocalStore<B> {
    fn clone(&self) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
        }
    }
}

impl LocalStore<MemoryBackend> {
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new())
    }
}

impl LocalStore<FileBackend> {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::open(path))
    }
}

impl<B: KeyValueBackend> LocalStore<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str, fallback: T) -> T {
        self.backend
            .get_raw(key)
            .and_then(|raw| serde_json::from_str::<Option<T>>(&raw).ok().flatten())
            .unwrap_or(fallback)
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(raw) => self.backend.set_raw(key, raw),
            Err(err) => error!(key, "failed to encode value: {err}"),
        }
    }

    pub fn remove(&self, key: &str) {
        self.backend.remove(key);
    }

    pub fn clear(&self) {
        self.backend.clear();
    }
}
