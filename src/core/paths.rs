//! Path utilities
//!
//! Resolves the store directory against the root and normalizes paths for output.

use std::path::{Path, PathBuf};

/// Default store directory name under the root
pub const STORE_DIR_NAME: &str = ".resume-cache";

/// Normalize a path to use '/' as separator (for cross-platform consistency)
pub fn normalize_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

/// Get the default store directory for a given root
pub fn default_store_dir(root: &Path) -> PathBuf {
    root.join(STORE_DIR_NAME)
}

/// Resolve `path` against `root` unless it is already absolute
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        let path = Path::new("a/b/c.json");
        assert_eq!(normalize_path(path), "a/b/c.json");
    }

    #[test]
    fn test_default_store_dir() {
        let root = Path::new("/project");
        assert_eq!(
            default_store_dir(root),
            PathBuf::from("/project/.resume-cache")
        );
    }

    #[test]
    fn test_resolve_against_relative() {
        let root = Path::new("/project");
        assert_eq!(
            resolve_against(root, Path::new("store")),
            PathBuf::from("/project/store")
        );
    }

    #[test]
    fn test_resolve_against_absolute() {
        let root = Path::new("/project");
        assert_eq!(
            resolve_against(root, Path::new("/var/store")),
            PathBuf::from("/var/store")
        );
    }
}
