//! Key-value persistence backends

use crate::io::{atomic_write, read_optional, FileLock};
use anyhow::{bail, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Durable string store addressed by fixed keys
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Delete `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<()>;

    /// Read-modify-write of `key` under an exclusive lock.
    ///
    /// `f` receives the current value and returns the value to store. No
    /// other `update`, `set` or `remove` on the same key runs in between,
    /// across processes for [`FileStore`]. Nothing is written if `f` fails.
    fn update(&self, key: &str, f: &mut dyn FnMut(Option<String>) -> Result<String>) -> Result<()>;
}

fn check_key(key: &str) -> Result<()> {
    if key.is_empty()
        || !key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        bail!("invalid storage key: {:?}", key);
    }
    Ok(())
}

/// Stores each key as `<key>.json` inside a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        check_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        Ok(read_optional(&path)?)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _lock = FileLock::acquire(&path)?;
        atomic_write(&path, value.as_bytes())?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        let _lock = FileLock::acquire(&path)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn update(&self, key: &str, f: &mut dyn FnMut(Option<String>) -> Result<String>) -> Result<()> {
        let path = self.path_for(key)?;
        let _lock = FileLock::acquire(&path)?;
        let next = f(read_optional(&path)?)?;
        atomic_write(&path, next.as_bytes())?;
        Ok(())
    }
}

/// In-process store, used by tests and ephemeral sessions
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.values
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        check_key(key)?;
        Ok(self.lock().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        check_key(key)?;
        self.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        check_key(key)?;
        self.lock().remove(key);
        Ok(())
    }

    fn update(&self, key: &str, f: &mut dyn FnMut(Option<String>) -> Result<String>) -> Result<()> {
        check_key(key)?;
        let mut values = self.lock();
        let next = f(values.get(key).cloned())?;
        values.insert(key.to_string(), next);
        Ok(())
    }
}
