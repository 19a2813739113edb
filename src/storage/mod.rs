//! Key-value storage backing quota and conversation persistence
//!
//! Every persisted value is a JSON string stored under a fixed key. Callers
//! read the whole value, modify it, and write it back; there are no partial
//! updates at this layer.

use crate::error::{Result, SoulCareError};
use directories::ProjectDirs;
use sled::Db;
use std::path::{Path, PathBuf};

pub mod memory;
pub use memory::MemoryStore;

/// A string-keyed store of string values
///
/// Implementations must make `set` and `remove` durable before returning.
/// No locking is implied: two handles doing read-modify-write against the
/// same key race, and the last write wins.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`; removing an absent key succeeds
    fn remove(&self, key: &str) -> Result<()>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<()> {
        (**self).remove(key)
    }
}

/// Embedded on-disk store backed by `sled`
pub struct SledStore {
    db: Db,
    path: PathBuf,
}

impl SledStore {
    /// Open or create a store at the given directory
    ///
    /// # Errors
    ///
    /// Returns `SoulCareError::Storage` if the database cannot be opened,
    /// including when another process already holds it.
    ///
    /// # Examples
    ///
    /// ```
    /// use soulcare::storage::{KeyValueStore, SledStore};
    ///
    /// # fn main() -> soulcare::error::Result<()> {
    /// let dir = tempfile::tempdir()?;
    /// let store = SledStore::open(dir.path().join("store"))?;
    /// store.set("greeting", "hello")?;
    /// assert_eq!(store.get("greeting")?, Some("hello".to_string()));
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SoulCareError::Storage(format!("Failed to create data directory: {}", e))
            })?;
        }

        let db = sled::open(&path)
            .map_err(|e| SoulCareError::Storage(format!("Failed to open database: {}", e)))?;

        tracing::debug!(path = %path.display(), "Opened key-value store");
        Ok(Self { db, path })
    }

    /// Open the store in its default location
    ///
    /// Uses `data_dir` when given, else the platform data directory. The
    /// database lives in a `store` subdirectory of whichever is chosen.
    /// Environment and command-line overrides are resolved by
    /// [`crate::config::Config::load`] before this is called.
    pub fn open_default(data_dir: Option<&Path>) -> Result<Self> {
        let base = match data_dir {
            Some(dir) => dir.to_path_buf(),
            None => default_data_dir()?,
        };
        Self::open(base.join("store"))
    }

    /// Directory holding the database
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// The platform data directory for SoulCare
pub fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = ProjectDirs::from("org", "soulcare", "soulcare")
        .ok_or_else(|| SoulCareError::Storage("Could not determine data directory".into()))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

impl KeyValueStore for SledStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .db
            .get(key.as_bytes())
            .map_err(|e| SoulCareError::Storage(format!("Get failed: {}", e)))?;

        match value {
            Some(bytes) => {
                let text = String::from_utf8(bytes.to_vec())
                    .map_err(|e| SoulCareError::Storage(format!("Value is not UTF-8: {}", e)))?;
                Ok(Some(text))
            }
            None => Ok(None),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.db
            .insert(key.as_bytes(), value.as_bytes())
            .map_err(|e| SoulCareError::Storage(format!("Insert failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| SoulCareError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.db
            .remove(key.as_bytes())
            .map_err(|e| SoulCareError::Storage(format!("Remove failed: {}", e)))?;

        self.db
            .flush()
            .map_err(|e| SoulCareError::Storage(format!("Flush failed: {}", e)))?;

        Ok(())
    }
}
