//! Cache store - Persistence capability behind the resume cache
//!
//! A store holds a single raw value under a single key. The cache layer owns
//! parsing, ordering and eviction; stores only move bytes.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::core::paths::normalize_path;

/// Errors raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("storage quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },
}

impl StoreError {
    fn io(path: &Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Key-value persistence for the serialized cache list
pub trait CacheStore {
    /// Read the stored value, `None` if the key is absent
    fn load(&self) -> Result<Option<String>, StoreError>;

    /// Replace the stored value
    fn save(&self, raw: &str) -> Result<(), StoreError>;

    /// Delete the stored value
    fn clear(&self) -> Result<(), StoreError>;

    /// Human-readable location of the stored value
    fn describe(&self) -> String;
}

/// File-backed store: `<dir>/<key>.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
    key: String,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(format!("{}.json", self.key))
    }

    fn ensure_dir(&self) -> Result<(), StoreError> {
        if !self.dir.exists() {
            fs::create_dir_all(&self.dir).map_err(|e| StoreError::io(&self.dir, e))?;
        }
        Ok(())
    }
}

impl CacheStore for FileStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        let path = self.path();
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    fn save(&self, raw: &str) -> Result<(), StoreError> {
        self.ensure_dir()?;

        // Write a sibling then rename so readers never see a partial array
        let path = self.path();
        let tmp = self.dir.join(format!(".{}.json.tmp", self.key));
        fs::write(&tmp, raw).map_err(|e| StoreError::io(&tmp, e))?;
        fs::rename(&tmp, &path).map_err(|e| StoreError::io(&path, e))?;
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    fn describe(&self) -> String {
        normalize_path(&self.path())
    }
}

/// In-process store with an optional byte quota
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStore {
    value: std::cell::RefCell<Option<String>>,
    quota: Option<usize>,
}

#[cfg(test)]
impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject writes larger than `quota` bytes
    pub fn with_quota(quota: usize) -> Self {
        Self {
            value: std::cell::RefCell::new(None),
            quota: Some(quota),
        }
    }

    /// Overwrite the raw value directly, bypassing the quota
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.value.borrow_mut() = Some(raw.into());
    }

    pub fn raw(&self) -> Option<String> {
        self.value.borrow().clone()
    }
}

#[cfg(test)]
impl CacheStore for MemoryStore {
    fn load(&self) -> Result<Option<String>, StoreError> {
        Ok(self.value.borrow().clone())
    }

    fn save(&self, raw: &str) -> Result<(), StoreError> {
        if let Some(quota) = self.quota {
            if raw.len() > quota {
                return Err(StoreError::QuotaExceeded {
                    needed: raw.len(),
                    quota,
                });
            }
        }
        *self.value.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), StoreError> {
        *self.value.borrow_mut() = None;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

impl<S: CacheStore + ?Sized> CacheStore for &S {
    fn load(&self) -> Result<Option<String>, StoreError> {
        (**self).load()
    }

    fn save(&self, raw: &str) -> Result<(), StoreError> {
        (**self).save(raw)
    }

    fn clear(&self) -> Result<(), StoreError> {
        (**self).clear()
    }

    fn describe(&self) -> String {
        (**self).describe()
    }
}
