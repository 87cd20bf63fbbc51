use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const ITEMS_KEY: &str = "items";
pub const THEME_KEY: &str = "theme";

const STORE_DIR: &str = ".shelf";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{STORE_DIR}/ already exists")]
    AlreadyInitialized,
    #[error("no {STORE_DIR}/ store found (run `shelf init` first)")]
    NotInitialized,
    #[error("store I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("corrupt store data: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// Key-value persistence for whole-collection snapshots. Values are opaque
/// strings; callers own serialization.
pub trait KvStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

/// One file per key under a `.shelf/` directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn init_at(dir: &Path) -> Result<Self, StoreError> {
        let root = dir.join(STORE_DIR);
        if root.exists() {
            return Err(StoreError::AlreadyInitialized);
        }
        fs::create_dir_all(&root)?;
        log::debug!("created store at {}", root.display());
        Ok(Self { root })
    }

    pub fn open_at(dir: &Path) -> Result<Self, StoreError> {
        let root = dir.join(STORE_DIR);
        if !root.is_dir() {
            return Err(StoreError::NotInitialized);
        }
        Ok(Self { root })
    }

    /// Create `.shelf/` in the current directory.
    pub fn init() -> Result<Self, StoreError> {
        Self::init_at(&std::env::current_dir()?)
    }

    /// Open `.shelf/` in the current directory.
    pub fn open() -> Result<Self, StoreError> {
        Self::open_at(&std::env::current_dir()?)
    }

    fn key_path(&self, key: &str) -> PathBuf {
        self.root.join(key)
    }
}

impl KvStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.key_path(key)) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::write(self.key_path(key), value)?;
        log::debug!("wrote {} bytes to key '{key}'", value.len());
        Ok(())
    }
}

/// In-memory store backing unit tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemStore(std::collections::HashMap<String, String>);

#[cfg(test)]
impl MemStore {
    pub fn get(&self, key: &str) -> Option<&String> {
        self.0.get(key)
    }

    pub fn with(key: &str, value: &str) -> Self {
        let mut store = Self::default();
        store.0.insert(key.to_string(), value.to_string());
        store
    }
}

#[cfg(test)]
impl KvStore for MemStore {
    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.0.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.0.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
