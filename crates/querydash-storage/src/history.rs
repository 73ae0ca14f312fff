//! Capped, write-through query history

use crate::kv::KeyValueStore;
use crate::types::{EntryKey, HistoryEntry, QueryStatus};
use anyhow::{anyhow, bail, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

/// Storage key holding the serialized history list
pub const HISTORY_KEY: &str = "query_history";

/// Maximum number of retained entries
pub const HISTORY_CAP: usize = 50;

#[derive(Debug, Default, Serialize, Deserialize)]
struct HistoryDocument {
    queries: Vec<HistoryEntry>,
}

/// Owns the list of history entries and is the only writer of `HISTORY_KEY`.
///
/// Entries are kept most recent first. Every mutation re-reads the stored
/// list under the backend's lock, applies the change and writes it back
/// before returning, so stores sharing one backend never drop each other's
/// entries. If the write fails the in-memory list is left unchanged.
pub struct HistoryStore {
    backend: Arc<dyn KeyValueStore>,
    entries: Vec<HistoryEntry>,
    cap: usize,
}

fn decode_entries(raw: Option<&str>) -> Vec<HistoryEntry> {
    match raw {
        Some(raw) => match serde_json::from_str::<HistoryDocument>(raw) {
            Ok(doc) => doc.queries,
            Err(e) => {
                tracing::warn!(error = %e, "stored history is unreadable, starting empty");
                Vec::new()
            }
        },
        None => Vec::new(),
    }
}

impl HistoryStore {
    /// Load history from `backend`, starting empty if the stored value is
    /// missing or unreadable
    pub fn load(backend: Arc<dyn KeyValueStore>) -> Self {
        Self::load_with_cap(backend, HISTORY_CAP)
    }

    pub fn load_with_cap(backend: Arc<dyn KeyValueStore>, cap: usize) -> Self {
        let mut entries = match backend.get(HISTORY_KEY) {
            Ok(raw) => decode_entries(raw.as_deref()),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored history, starting empty");
                Vec::new()
            }
        };

        entries.truncate(cap);

        Self {
            backend,
            entries,
            cap,
        }
    }

    /// Entries, most recent first, as of the last load or mutation
    pub fn list(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }

    pub fn get(&self, key: &EntryKey) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.matches(key))
    }

    /// First entry submitted at `submitted_at` (entries are addressed by
    /// timestamp on the command line)
    pub fn find_by_timestamp(&self, submitted_at: DateTime<Utc>) -> Option<&HistoryEntry> {
        self.entries.iter().find(|e| e.submitted_at == submitted_at)
    }

    /// Insert `entry` at the front, evicting the oldest beyond the cap.
    ///
    /// Returns `false` when an entry with the same text and timestamp
    /// already exists.
    pub fn append(&mut self, entry: HistoryEntry) -> Result<bool> {
        self.mutate(|entries| {
            let key = entry.key();
            if entries.iter().any(|e| e.matches(&key)) {
                tracing::debug!(text = %entry.text, "duplicate history entry suppressed");
                return Ok(false);
            }
            entries.insert(0, entry);
            Ok(true)
        })
    }

    /// Delete the entry for `key`. Returns `false` if nothing matched.
    pub fn remove(&mut self, key: &EntryKey) -> Result<bool> {
        self.mutate(|entries| {
            let before = entries.len();
            entries.retain(|e| !e.matches(key));
            Ok(entries.len() != before)
        })
    }

    /// Move a pending entry to `completed` or `failed`.
    ///
    /// Returns `false` if no entry matches `key` (it may have been removed or
    /// evicted while the query was in flight).
    pub fn update_status(&mut self, key: &EntryKey, status: QueryStatus) -> Result<bool> {
        self.mutate(|entries| {
            let Some(entry) = entries.iter_mut().find(|e| e.matches(key)) else {
                return Ok(false);
            };
            if !entry.status.can_become(status) {
                bail!("cannot change history entry from {} to {}", entry.status, status);
            }
            entry.status = status;
            Ok(true)
        })
    }

    /// Drop every entry
    pub fn clear(&mut self) -> Result<()> {
        self.mutate(|entries| {
            entries.clear();
            Ok(())
        })
    }

    /// Distinct query texts, newest first
    pub fn recent_texts(&self, limit: usize) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.entries
            .iter()
            .map(|e| e.text.as_str())
            .filter(|text| seen.insert(text.to_lowercase()))
            .take(limit)
            .collect()
    }

    /// Apply `op` to the freshly stored list and write the result back
    fn mutate<R>(&mut self, op: impl FnOnce(&mut Vec<HistoryEntry>) -> Result<R>) -> Result<R> {
        let cap = self.cap;
        let mut op = Some(op);
        let mut outcome: Option<(Vec<HistoryEntry>, R)> = None;

        self.backend.update(
            HISTORY_KEY,
            &mut |current: Option<String>| -> Result<String> {
                let op = op.take().ok_or_else(|| anyhow!("history update retried"))?;
                let mut entries = decode_entries(current.as_deref());
                let result = op(&mut entries)?;
                if entries.len() > cap {
                    tracing::debug!(evicted = entries.len() - cap, "history cap reached");
                    entries.truncate(cap);
                }
                let doc = HistoryDocument { queries: entries };
                let json = serde_json::to_string(&doc)?;
                outcome = Some((doc.queries, result));
                Ok(json)
            },
        )?;

        let (entries, result) = outcome.ok_or_else(|| anyhow!("history update did not run"))?;
        self.entries = entries;
        Ok(result)
    }
}
