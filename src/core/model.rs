//! Unified Result Model
//!
//! Every command maps its output to this model before rendering.

use serde::{Deserialize, Serialize};

use crate::cache::entry::CacheEntry;
use crate::cache::status::CacheStatus;

/// The kind of result item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kind {
    Entry,
    Stale,
    Status,
    Info,
    Error,
}

/// Error information for a result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheError {
    pub code: String,
    pub message: String,
}

impl CacheError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// The unified result item that all commands produce
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultItem {
    /// The kind of this result
    pub kind: Kind,

    /// Resume identifier
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Display name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Last added/updated (ms since epoch)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<i64>,

    /// Position in the recent list (0 = most recent)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<usize>,

    /// Structured payload (status snapshots)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,

    /// Short human-readable note
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Errors (if any)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<CacheError>,
}

impl ResultItem {
    fn empty(kind: Kind) -> Self {
        Self {
            kind,
            id: None,
            name: None,
            timestamp: None,
            rank: None,
            data: None,
            message: None,
            errors: Vec::new(),
        }
    }

    /// Create an entry result
    pub fn entry(entry: &CacheEntry, rank: usize) -> Self {
        Self {
            id: Some(entry.id.clone()),
            name: Some(entry.name.clone()),
            timestamp: Some(entry.timestamp),
            rank: Some(rank),
            ..Self::empty(Kind::Entry)
        }
    }

    /// Create a stale-id result
    pub fn stale(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::empty(Kind::Stale)
        }
    }

    /// Create a status result
    pub fn status(status: &CacheStatus) -> Self {
        Self {
            data: serde_json::to_value(status).ok(),
            ..Self::empty(Kind::Status)
        }
    }

    /// Create an informational result
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
            ..Self::empty(Kind::Info)
        }
    }

    /// Create a new error result
    pub fn error(error: CacheError) -> Self {
        Self {
            errors: vec![error],
            ..Self::empty(Kind::Error)
        }
    }

    /// Set the resume id
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }
}

/// Result set containing multiple result items
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResultSet {
    pub items: Vec<ResultItem>,
}

impl ResultSet {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn push(&mut self, item: ResultItem) {
        self.items.push(item);
    }

    /// Build a set of entry results, ranked in list order
    pub fn from_entries(entries: &[CacheEntry]) -> Self {
        entries
            .iter()
            .enumerate()
            .map(|(rank, e)| ResultItem::entry(e, rank))
            .collect()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl IntoIterator for ResultSet {
    type Item = ResultItem;
    type IntoIter = std::vec::IntoIter<ResultItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl FromIterator<ResultItem> for ResultSet {
    fn from_iter<T: IntoIterator<Item = ResultItem>>(iter: T) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}
