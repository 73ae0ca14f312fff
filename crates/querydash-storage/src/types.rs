//! Persisted record types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which resolver answers a query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryMode {
    /// Keyword-matched canned data
    #[default]
    Local,
    /// External generative-language API
    #[serde(alias = "ai")]
    Remote,
}

impl QueryMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Local => "local",
            QueryMode::Remote => "remote",
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown query mode '{0}' (expected 'local' or 'remote')")]
pub struct ParseModeError(pub String);

impl FromStr for QueryMode {
    type Err = ParseModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(QueryMode::Local),
            "remote" | "ai" => Ok(QueryMode::Remote),
            other => Err(ParseModeError(other.to_string())),
        }
    }
}

/// Lifecycle of a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Pending,
    Completed,
    Failed,
}

impl QueryStatus {
    /// Only `pending` entries may change, and only to a terminal status
    pub fn can_become(&self, next: QueryStatus) -> bool {
        matches!(
            (self, next),
            (QueryStatus::Pending, QueryStatus::Completed)
                | (QueryStatus::Pending, QueryStatus::Failed)
        )
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            QueryStatus::Pending => "pending",
            QueryStatus::Completed => "completed",
            QueryStatus::Failed => "failed",
        })
    }
}

/// Identity of a history entry: submission time plus text
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryKey {
    pub submitted_at: DateTime<Utc>,
    pub text: String,
}

/// A submitted query as remembered by the history store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub mode: QueryMode,
    /// Millisecond precision; stored as epoch millis
    #[serde(rename = "timestamp", with = "chrono::serde::ts_milliseconds")]
    pub submitted_at: DateTime<Utc>,
    pub status: QueryStatus,
}

impl HistoryEntry {
    /// New `pending` entry. The timestamp is truncated to milliseconds.
    pub fn pending(text: impl Into<String>, mode: QueryMode, submitted_at: DateTime<Utc>) -> Self {
        Self {
            text: text.into(),
            mode,
            submitted_at: truncate_millis(submitted_at),
            status: QueryStatus::Pending,
        }
    }

    pub fn key(&self) -> EntryKey {
        EntryKey {
            submitted_at: self.submitted_at,
            text: self.text.clone(),
        }
    }

    pub fn matches(&self, key: &EntryKey) -> bool {
        self.submitted_at == key.submitted_at && self.text == key.text
    }
}

fn truncate_millis(ts: DateTime<Utc>) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ts.timestamp_millis()).unwrap_or(ts)
}
