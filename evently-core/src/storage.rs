//! String-keyed storage port and its adapters.
//!
//! Every collection is stored whole under a single key as a JSON array.
//! There is no partial update: callers read the entire value, modify it in
//! memory and write it back.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{EventlyError, EventlyResult};

pub const USERS_KEY: &str = "users";
pub const CATEGORIES_KEY: &str = "categories";

/// A synchronous key-value store holding string values.
pub trait Storage {
    fn get_item(&self, key: &str) -> EventlyResult<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> EventlyResult<()>;
}

/// Read the collection under `key`. A missing key is an empty collection; a
/// value that does not parse as an array of `T` is an error.
pub fn read_collection<S, T>(storage: &S, key: &str) -> EventlyResult<Vec<T>>
where
    S: Storage + ?Sized,
    T: DeserializeOwned,
{
    let Some(raw) = storage.get_item(key)? else {
        return Ok(Vec::new());
    };

    serde_json::from_str(&raw).map_err(|e| EventlyError::CorruptCollection {
        key: key.to_string(),
        reason: e.to_string(),
    })
}

/// Serialize and write the whole collection under `key`.
pub fn write_collection<S, T>(storage: &S, key: &str, items: &[T]) -> EventlyResult<()>
where
    S: Storage + ?Sized,
    T: Serialize,
{
    let raw = serde_json::to_string(items)?;
    storage.set_item(key, &raw)
}

/// In-process storage. Clones share the same underlying map, the way every
/// open window of an app shares one local store.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    inner: Arc<Mutex<MemoryInner>>,
}

#[derive(Default)]
struct MemoryInner {
    items: HashMap<String, String>,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful `set_item` calls so far.
    pub fn write_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.writes).unwrap_or(0)
    }

    fn lock(&self) -> EventlyResult<std::sync::MutexGuard<'_, MemoryInner>> {
        self.inner
            .lock()
            .map_err(|_| EventlyError::Storage("memory storage lock poisoned".into()))
    }
}

impl Storage for MemoryStorage {
    fn get_item(&self, key: &str) -> EventlyResult<Option<String>> {
        Ok(self.lock()?.items.get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> EventlyResult<()> {
        let mut inner = self.lock()?;
        inner.items.insert(key.to_string(), value.to_string());
        inner.writes += 1;
        Ok(())
    }
}

/// Storage backed by one `<key>.json` file per key in a directory.
#[derive(Clone, Debug)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> EventlyResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(EventlyError::Storage(format!("Invalid storage key '{key}'")));
        }

        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl Storage for FileStorage {
    fn get_item(&self, key: &str) -> EventlyResult<Option<String>> {
        let path = self.path_for(key)?;

        if !path.exists() {
            return Ok(None);
        }

        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set_item(&self, key: &str, value: &str) -> EventlyResult<()> {
        let path = self.path_for(key)?;
        std::fs::create_dir_all(&self.dir)?;

        let temp = path.with_extension("json.tmp");
        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }
}
