use crate::error::Result;
use crate::{io, paths};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Synchronous string key-value storage, the shape of browser local storage.
pub trait KvStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn store(&mut self, key: &str, value: &str) -> Result<()>;
}

// ---------------------------------------------------------------------------
// FileStore
// ---------------------------------------------------------------------------

/// One `<key>.json` file per key inside a directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// The store under `<root>/.showdesign/store`.
    pub fn for_root(root: &Path) -> Self {
        Self::new(paths::store_dir(root))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl KvStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        paths::validate_storage_key(key)?;
        io::read_if_exists(&paths::store_entry(&self.dir, key))
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        paths::validate_storage_key(key)?;
        io::atomic_write(&paths::store_entry(&self.dir, key), value.as_bytes())
    }
}

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.into(), value.into());
        Self { entries }
    }
}

impl KvStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn store(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
