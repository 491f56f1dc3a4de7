//! Configuration - Where and under which key the cache is stored

use std::path::{Path, PathBuf};

use crate::cache::entry::STORAGE_KEY;
use crate::cache::recent::ResumeCache;
use crate::cache::store::FileStore;
use crate::core::paths::{default_store_dir, resolve_against};

/// Resolved cache configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheConfig {
    pub store_dir: PathBuf,
    pub storage_key: String,
}

impl CacheConfig {
    /// Default configuration for a root directory
    pub fn new(root: &Path) -> Self {
        Self {
            store_dir: default_store_dir(root),
            storage_key: STORAGE_KEY.to_string(),
        }
    }

    /// Resolve from CLI inputs; relative store dirs are taken against `root`
    pub fn resolve(root: &Path, store_dir: Option<&Path>) -> Self {
        match store_dir {
            Some(dir) => Self::new(root).with_store_dir(resolve_against(root, dir)),
            None => Self::new(root),
        }
    }

    pub fn with_store_dir(mut self, dir: PathBuf) -> Self {
        self.store_dir = dir;
        self
    }

    pub fn file_store(&self) -> FileStore {
        FileStore::new(&self.store_dir, &self.storage_key)
    }

    /// Open the file-backed cache this configuration points at
    pub fn open(&self) -> ResumeCache<FileStore> {
        ResumeCache::new(self.file_store())
    }
}
