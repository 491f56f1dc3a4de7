//! Cache entry - the (id, name, timestamp) record tracked per resume

use serde::{Deserialize, Serialize};

/// Maximum number of resumes kept in the cache at once
pub const MAX_ENTRIES: usize = 10;

/// Fixed key the serialized list is stored under
pub const STORAGE_KEY: &str = "resumeCache";

/// A reference to a resume held by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Backend resume identifier
    pub id: String,

    /// User-assigned display label
    pub name: String,

    /// Last added/updated (ms since epoch)
    pub timestamp: i64,
}

impl CacheEntry {
    pub fn new(id: impl Into<String>, name: impl Into<String>, timestamp: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            timestamp,
        }
    }
}

/// Parse a raw stored value into entries.
///
/// Returns `None` when the value is not a JSON array of well-formed entries.
pub fn parse_entries(raw: &str) -> Option<Vec<CacheEntry>> {
    serde_json::from_str(raw).ok()
}

/// Serialize entries into the stored representation
pub fn serialize_entries(entries: &[CacheEntry]) -> serde_json::Result<String> {
    serde_json::to_string(entries)
}
