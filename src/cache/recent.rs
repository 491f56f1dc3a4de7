//! Recent resumes - Bounded, de-duplicated, most-recently-added list
//!
//! Only `add` changes an entry's position. Reads never reorder, so the list
//! tracks "recently added or updated", not "recently viewed".
//!
//! No operation here returns an error: unreadable or corrupt storage reads as
//! an empty list, and failed writes are logged and dropped.

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::cache::entry::{parse_entries, serialize_entries, CacheEntry, MAX_ENTRIES, STORAGE_KEY};
use crate::cache::status::CacheStatus;
use crate::cache::store::CacheStore;
use crate::core::util::now_ms;

/// Put `entry` at the front, dropping any entry with the same id and
/// truncating the tail to `capacity`. Returns the evicted entries.
pub fn insert_front(
    entries: &mut Vec<CacheEntry>,
    entry: CacheEntry,
    capacity: usize,
) -> Vec<CacheEntry> {
    entries.retain(|e| e.id != entry.id);
    entries.insert(0, entry);

    if entries.len() > capacity {
        entries.split_off(capacity)
    } else {
        Vec::new()
    }
}

/// Remove the entry with `id`, keeping the order of the rest
pub fn remove_id(entries: &mut Vec<CacheEntry>, id: &str) -> Option<CacheEntry> {
    let pos = entries.iter().position(|e| e.id == id)?;
    Some(entries.remove(pos))
}

/// Resume cache over a persistence store
pub struct ResumeCache<S: CacheStore> {
    store: S,
}

impl<S: CacheStore> ResumeCache<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Add or refresh an entry at the most-recent position
    pub fn add(&self, entry: CacheEntry) {
        if entry.id.is_empty() {
            warn!("ignoring cache entry with empty id");
            return;
        }

        let mut entries = self.read();
        let id = entry.id.clone();
        let evicted = insert_front(&mut entries, entry, MAX_ENTRIES);

        for old in &evicted {
            debug!(id = %old.id, "evicted least recent resume");
        }
        debug!(id = %id, len = entries.len(), "added resume to cache");

        self.write(&entries);
    }

    /// Find an entry by id
    pub fn get(&self, id: &str) -> Option<CacheEntry> {
        self.read().into_iter().find(|e| e.id == id)
    }

    /// All entries, most recent first
    pub fn list(&self) -> Vec<CacheEntry> {
        self.read()
    }

    /// Remove an entry by id; absent ids are a no-op
    pub fn remove(&self, id: &str) {
        let mut entries = self.read();
        match remove_id(&mut entries, id) {
            Some(_) => {
                debug!(id = %id, "removed resume from cache");
                self.write(&entries);
            }
            None => debug!(id = %id, "resume not cached, nothing to remove"),
        }
    }

    /// Ids from `candidates` that are not cached, in input order, de-duplicated.
    ///
    /// Used to decide which server-side drafts have fallen out of the local
    /// list and can be discarded.
    pub fn stale_ids<I, T>(&self, candidates: I) -> Vec<String>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<str>,
    {
        let cached: HashSet<String> = self.read().into_iter().map(|e| e.id).collect();
        let mut seen = HashSet::new();

        candidates
            .into_iter()
            .map(|c| c.as_ref().trim().to_string())
            .filter(|id| !id.is_empty())
            .filter(|id| !cached.contains(id))
            .filter(|id| seen.insert(id.clone()))
            .collect()
    }

    /// Snapshot of the stored state
    pub fn status(&self) -> CacheStatus {
        let (present, readable, entries) = match self.store.load() {
            Ok(None) => (false, true, 0),
            Ok(Some(raw)) => match parse_entries(&raw) {
                Some(entries) => (true, true, entries.len()),
                None => (true, false, 0),
            },
            Err(e) => {
                warn!(error = %e, "cache store unreadable");
                (false, false, 0)
            }
        };

        CacheStatus {
            storage_key: STORAGE_KEY.to_string(),
            location: self.store.describe(),
            entries,
            capacity: MAX_ENTRIES,
            present,
            readable,
            checked_at: now_ms(),
        }
    }

    fn read(&self) -> Vec<CacheEntry> {
        match self.store.load() {
            Ok(Some(raw)) => parse_entries(&raw).unwrap_or_else(|| {
                debug!(location = %self.store.describe(), "corrupt cache value, treating as empty");
                Vec::new()
            }),
            Ok(None) => Vec::new(),
            Err(e) => {
                debug!(error = %e, "cache store unreadable, treating as empty");
                Vec::new()
            }
        }
    }

    fn write(&self, entries: &[CacheEntry]) {
        let raw = match serialize_entries(entries) {
            Ok(raw) => raw,
            Err(e) => {
                warn!(error = %e, "failed to serialize cache entries");
                return;
            }
        };

        if let Err(e) = self.store.save(&raw) {
            warn!(error = %e, "failed to persist resume cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::store::{FileStore, MemoryStore};
    use tempfile::tempdir;

    fn entry(id: &str, ts: i64) -> CacheEntry {
        CacheEntry::new(id, format!("{} CV", id), ts)
    }

    fn ids(entries: &[CacheEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[test]
    fn test_insert_front_dedups() {
        let mut entries = vec![entry("a", 2), entry("b", 1)];
        let evicted = insert_front(&mut entries, entry("b", 3), 10);

        assert!(evicted.is_empty());
        assert_eq!(ids(&entries), vec!["b", "a"]);
        assert_eq!(entries[0].timestamp, 3);
    }

    #[test]
    fn test_insert_front_evicts_tail() {
        let mut entries = vec![entry("b", 2), entry("a", 1)];
        let evicted = insert_front(&mut entries, entry("c", 3), 2);

        assert_eq!(ids(&evicted), vec!["a"]);
        assert_eq!(ids(&entries), vec!["c", "b"]);
    }

    #[test]
    fn test_insert_front_truncates_oversized_list() {
        let mut entries: Vec<_> = (0..12).map(|i| entry(&format!("r{}", i), i)).collect();
        let evicted = insert_front(&mut entries, entry("new", 99), 10);

        assert_eq!(entries.len(), 10);
        assert_eq!(evicted.len(), 3);
        assert_eq!(entries[0].id, "new");
    }

    #[test]
    fn test_remove_id_keeps_order() {
        let mut entries = vec![entry("c", 3), entry("b", 2), entry("a", 1)];
        let removed = remove_id(&mut entries, "b");

        assert_eq!(removed.map(|e| e.id), Some("b".to_string()));
        assert_eq!(ids(&entries), vec!["c", "a"]);
        assert!(remove_id(&mut entries, "zzz").is_none());
    }

    #[test]
    fn test_adds_are_most_recent_first() {
        let cache = ResumeCache::new(MemoryStore::new());
        for i in 0..MAX_ENTRIES {
            cache.add(entry(&format!("r{}", i), i as i64));

            let list = cache.list();
            assert_eq!(list.len(), i + 1);
            assert_eq!(list[0].id, format!("r{}", i));
        }

        let list = cache.list();
        let expected: Vec<String> = (0..MAX_ENTRIES).rev().map(|i| format!("r{}", i)).collect();
        let got: Vec<String> = list.into_iter().map(|e| e.id).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_eleventh_add_evicts_oldest() {
        let cache = ResumeCache::new(MemoryStore::new());
        for i in 0..MAX_ENTRIES {
            cache.add(entry(&format!("r{}", i), i as i64));
        }

        cache.add(entry("r10", 10));

        let list = cache.list();
        assert_eq!(list.len(), MAX_ENTRIES);
        assert_eq!(list[0].id, "r10");
        assert!(cache.get("r0").is_none());
        for i in 1..=MAX_ENTRIES {
            assert!(cache.get(&format!("r{}", i)).is_some());
        }
    }

    #[test]
    fn test_readd_moves_to_front_and_replaces() {
        let cache = ResumeCache::new(MemoryStore::new());
        cache.add(CacheEntry::new("r1", "Backend CV", 1000));
        cache.add(CacheEntry::new("r2", "Frontend CV", 2000));

        assert_eq!(ids(&cache.list()), vec!["r2", "r1"]);

        cache.add(CacheEntry::new("r1", "Backend CV v2", 3000));

        assert_eq!(
            cache.list(),
            vec![
                CacheEntry::new("r1", "Backend CV v2", 3000),
                CacheEntry::new("r2", "Frontend CV", 2000),
            ]
        );
    }

    #[test]
    fn test_reads_do_not_reorder() {
        let cache = ResumeCache::new(MemoryStore::new());
        cache.add(entry("a", 1));
        cache.add(entry("b", 2));
        cache.add(entry("c", 3));

        assert!(cache.get("a").is_some());
        let _ = cache.list();
        assert!(cache.get("a").is_some());

        assert_eq!(ids(&cache.list()), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_get_round_trip() {
        let cache = ResumeCache::new(MemoryStore::new());
        let e = CacheEntry::new("r1", "Backend CV", 1000);
        cache.add(e.clone());

        assert_eq!(cache.get("r1"), Some(e));
        assert_eq!(cache.get("missing"), None);
    }

    #[test]
    fn test_get_after_external_clear() {
        let store = MemoryStore::new();
        let cache = ResumeCache::new(&store);
        cache.add(entry("r1", 1));

        store.clear().unwrap();

        assert!(cache.get("r1").is_none());
        assert!(cache.list().is_empty());
    }

    #[test]
    fn test_remove() {
        let cache = ResumeCache::new(MemoryStore::new());
        cache.add(entry("a", 1));
        cache.add(entry("b", 2));
        cache.add(entry("c", 3));

        cache.remove("b");
        assert_eq!(ids(&cache.list()), vec!["c", "a"]);

        cache.remove("nope");
        assert_eq!(ids(&cache.list()), vec!["c", "a"]);
    }

    #[test]
    fn test_remove_absent_does_not_write() {
        let store = MemoryStore::new();
        let cache = ResumeCache::new(&store);

        cache.remove("nope");
        assert!(store.raw().is_none());

        store.set_raw("{ not a list");
        cache.remove("nope");
        assert_eq!(store.raw().as_deref(), Some("{ not a list"));
    }

    #[test]
    fn test_corrupt_store_reads_empty() {
        let store = MemoryStore::new();
        let cache = ResumeCache::new(&store);

        for raw in ["{not json", "42", "{\"id\":\"r1\"}", "[{\"name\":\"x\"}]", ""] {
            store.set_raw(raw);
            assert!(cache.list().is_empty(), "raw value {:?}", raw);
            assert!(cache.get("r1").is_none());
        }
    }

    #[test]
    fn test_add_over_corrupt_store_recovers() {
        let store = MemoryStore::new();
        store.set_raw("garbage");
        let cache = ResumeCache::new(&store);

        cache.add(entry("r1", 1));

        assert_eq!(ids(&cache.list()), vec!["r1"]);
    }

    #[test]
    fn test_empty_id_ignored() {
        let store = MemoryStore::new();
        let cache = ResumeCache::new(&store);
        cache.add(CacheEntry::new("", "nameless", 1));

        assert!(cache.list().is_empty());
        assert!(store.raw().is_none());
    }

    #[test]
    fn test_write_failure_is_swallowed() {
        // Room for one entry only
        let store = MemoryStore::with_quota(64);
        let cache = ResumeCache::new(&store);

        cache.add(CacheEntry::new("r1", "CV", 1));
        assert_eq!(cache.list().len(), 1);

        cache.add(CacheEntry::new("r2", "A much longer resume display name", 2));

        // Previous state survives
        assert_eq!(ids(&cache.list()), vec!["r1"]);
    }

    #[test]
    fn test_stale_ids() {
        let cache = ResumeCache::new(MemoryStore::new());
        cache.add(entry("keep1", 1));
        cache.add(entry("keep2", 2));

        let stale = cache.stale_ids(["draft1", "keep1", "draft2", "draft1", " ", "keep2"]);
        assert_eq!(stale, vec!["draft1", "draft2"]);
    }

    #[test]
    fn test_stale_ids_empty_cache() {
        let cache = ResumeCache::new(MemoryStore::new());
        let stale = cache.stale_ids(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(stale, vec!["a", "b"]);
    }

    #[test]
    fn test_status() {
        let store = MemoryStore::new();
        let cache = ResumeCache::new(&store);

        let status = cache.status();
        assert!(!status.present);
        assert!(status.readable);
        assert_eq!(status.entries, 0);
        assert_eq!(status.capacity, MAX_ENTRIES);
        assert_eq!(status.storage_key, STORAGE_KEY);

        cache.add(entry("a", 1));
        let status = cache.status();
        assert!(status.present);
        assert_eq!(status.entries, 1);

        store.set_raw("oops");
        assert!(cache.status().is_corrupt());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let temp = tempdir().unwrap();

        {
            let cache = ResumeCache::new(FileStore::new(temp.path(), STORAGE_KEY));
            cache.add(CacheEntry::new("r1", "Backend CV", 1000));
            cache.add(CacheEntry::new("r2", "Frontend CV", 2000));
        }

        let cache = ResumeCache::new(FileStore::new(temp.path(), STORAGE_KEY));
        assert_eq!(ids(&cache.list()), vec!["r2", "r1"]);
    }

    #[test]
    fn test_unwritable_file_store_degrades() {
        let temp = tempdir().unwrap();
        let blocker = temp.path().join("blocker");
        std::fs::write(&blocker, "x").unwrap();

        let cache = ResumeCache::new(FileStore::new(&blocker, STORAGE_KEY));
        cache.add(entry("r1", 1));
        cache.remove("r1");

        assert!(cache.list().is_empty());
        assert!(cache.get("r1").is_none());
    }
}
