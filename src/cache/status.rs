//! Cache status reporting

use serde::{Deserialize, Serialize};

/// Snapshot of the stored cache, as reported by `status`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStatus {
    /// Key the list is stored under
    pub storage_key: String,

    /// Where the store keeps the value
    pub location: String,

    /// Entries currently readable
    pub entries: usize,

    /// Maximum entries kept
    pub capacity: usize,

    /// Whether a value exists under the key
    pub present: bool,

    /// Whether the value parsed as an entry list
    pub readable: bool,

    /// When the snapshot was taken (ms since epoch)
    pub checked_at: i64,
}

impl CacheStatus {
    /// A present value that failed to parse
    pub fn is_corrupt(&self) -> bool {
        self.present && !self.readable
    }
}
