//! Cache API - Command handlers mapping cache operations to result sets

use anyhow::{bail, Context, Result};
use std::io::BufRead;
use tracing::info;

use crate::cache::entry::CacheEntry;
use crate::cache::recent::ResumeCache;
use crate::cache::store::CacheStore;
use crate::core::model::{CacheError, ResultItem, ResultSet};
use crate::core::render::{RenderConfig, Renderer};

/// Add an entry and report where it landed
pub fn add_entry<S: CacheStore>(
    cache: &ResumeCache<S>,
    id: &str,
    name: &str,
    timestamp: i64,
) -> Result<ResultSet> {
    let id = id.trim();
    if id.is_empty() {
        bail!("resume id must not be empty");
    }

    let requested = CacheEntry::new(id, name, timestamp);
    cache.add(requested.clone());

    // Persisted only if the read-back front entry is exactly what was asked for
    let mut result_set = ResultSet::new();
    let entries = cache.list();
    match entries.first() {
        Some(front) if *front == requested => result_set.push(ResultItem::entry(front, 0)),
        _ => result_set.push(
            ResultItem::error(CacheError::new(
                "NOT_PERSISTED",
                format!("{} could not be written to {}", id, cache.store().describe()),
            ))
            .with_id(id),
        ),
    }

    Ok(result_set)
}

/// Look up one entry; absent ids yield an empty set
pub fn get_entry<S: CacheStore>(cache: &ResumeCache<S>, id: &str) -> ResultSet {
    let entries = cache.list();
    entries
        .iter()
        .position(|e| e.id == id)
        .map(|rank| ResultItem::entry(&entries[rank], rank))
        .into_iter()
        .collect()
}

/// All entries, most recent first
pub fn list_entries<S: CacheStore>(cache: &ResumeCache<S>) -> ResultSet {
    ResultSet::from_entries(&cache.list())
}

/// Remove an entry and report whether anything was removed
pub fn remove_entry<S: CacheStore>(cache: &ResumeCache<S>, id: &str) -> ResultSet {
    let existed = cache.get(id).is_some();
    cache.remove(id);

    let message = if !existed {
        format!("{} was not cached", id)
    } else if cache.get(id).is_none() {
        format!("removed {}", id)
    } else {
        format!("{} could not be removed", id)
    };

    let mut result_set = ResultSet::new();
    result_set.push(ResultItem::info(message).with_id(id));
    result_set
}

/// Candidate ids that are no longer cached
pub fn prune_candidates<S: CacheStore>(cache: &ResumeCache<S>, candidates: &[String]) -> ResultSet {
    cache
        .stale_ids(candidates)
        .into_iter()
        .map(ResultItem::stale)
        .collect()
}

/// Status snapshot, with an error item when the stored value is corrupt
pub fn cache_status<S: CacheStore>(cache: &ResumeCache<S>) -> ResultSet {
    let status = cache.status();
    let mut result_set = ResultSet::new();

    if status.is_corrupt() {
        result_set.push(ResultItem::error(CacheError::new(
            "CORRUPT_STORE",
            format!("{} does not hold a valid entry list", status.location),
        )));
    } else if !status.readable {
        result_set.push(ResultItem::error(CacheError::new(
            "UNREADABLE_STORE",
            format!("{} could not be read", status.location),
        )));
    }

    result_set.push(ResultItem::status(&status));
    result_set
}

/// Delete the stored list
pub fn clear_store<S: CacheStore>(cache: &ResumeCache<S>) -> ResultSet {
    let mut result_set = ResultSet::new();
    match cache.store().clear() {
        Ok(()) => {
            info!(location = %cache.store().describe(), "cleared resume cache");
            result_set.push(ResultItem::info("cache cleared"));
        }
        Err(e) => result_set.push(ResultItem::error(CacheError::new(
            "CLEAR_FAILED",
            e.to_string(),
        ))),
    }
    result_set
}

/// Read candidate ids from a reader, one per line
pub fn read_candidates<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut ids = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read candidate ids")?;
        let trimmed = line.trim();
        if !trimmed.is_empty() {
            ids.push(trimmed.to_string());
        }
    }
    Ok(ids)
}

/// Run add command
pub fn run_add<S: CacheStore>(
    cache: &ResumeCache<S>,
    id: &str,
    name: &str,
    timestamp: Option<i64>,
    config: RenderConfig,
) -> Result<()> {
    let timestamp = timestamp.unwrap_or_else(crate::core::util::now_ms);
    let result_set = add_entry(cache, id, name, timestamp)?;
    Renderer::with_config(config).print(&result_set);
    Ok(())
}

/// Run get command
pub fn run_get<S: CacheStore>(cache: &ResumeCache<S>, id: &str, config: RenderConfig) -> Result<()> {
    Renderer::with_config(config).print(&get_entry(cache, id));
    Ok(())
}

/// Run list command
pub fn run_list<S: CacheStore>(cache: &ResumeCache<S>, config: RenderConfig) -> Result<()> {
    Renderer::with_config(config).print(&list_entries(cache));
    Ok(())
}

/// Run remove command
pub fn run_remove<S: CacheStore>(
    cache: &ResumeCache<S>,
    id: &str,
    config: RenderConfig,
) -> Result<()> {
    Renderer::with_config(config).print(&remove_entry(cache, id));
    Ok(())
}

/// Run prune command; reads stdin when no ids are given
pub fn run_prune<S: CacheStore>(
    cache: &ResumeCache<S>,
    ids: Vec<String>,
    config: RenderConfig,
) -> Result<()> {
    let candidates = if ids.is_empty() {
        read_candidates(std::io::stdin().lock())?
    } else {
        ids
    };

    Renderer::with_config(config).print(&prune_candidates(cache, &candidates));
    Ok(())
}

/// Run status command
pub fn run_status<S: CacheStore>(cache: &ResumeCache<S>, config: RenderConfig) -> Result<()> {
    Renderer::with_config(config).print(&cache_status(cache));
    Ok(())
}

/// Run clear command
pub fn run_clear<S: CacheStore>(cache: &ResumeCache<S>, config: RenderConfig) -> Result<()> {
    Renderer::with_config(config).print(&clear_store(cache));
    Ok(())
}
