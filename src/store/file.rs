//! File-backed store: one pretty-printed JSON file per key

use super::{PlanStore, StoreError};
use serde_json::Value;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Plan store rooted at a directory, writing `<key>.json` files
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`; the directory is created on first write
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory holding the store files
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StoreError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl PlanStore for FileStore {
    fn read(&self, key: &str) -> Result<Option<Value>, StoreError> {
        let path = self.path_for(key)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path.display().to_string(), e)),
        };
        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| StoreError::json(key, e))
    }

    fn write(&mut self, key: &str, value: &Value) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)
            .map_err(|e| StoreError::io(self.root.display().to_string(), e))?;
        let json = serde_json::to_string_pretty(value).map_err(|e| StoreError::json(key, e))?;
        fs::write(&path, json).map_err(|e| StoreError::io(path.display().to_string(), e))?;
        crate::debug!("Wrote {}", path.display());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> Result<(), StoreError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path.display().to_string(), e)),
        }
    }
}
