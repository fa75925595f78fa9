//! Query and aggregate types for reading call history back.

use crate::entry::StoredEntry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// A filter over stored call history.
///
/// Every field is optional: an absent filter imposes no constraint. Date
/// bounds are inclusive. `limit` and `offset` paginate the filtered, sorted
/// result set — they are never pushed down to the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallQuery {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub step: Option<String>,

    /// Earliest timestamp to include (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<DateTime<Utc>>,

    /// Latest timestamp to include (inclusive).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,

    /// Maximum number of entries to return. `Some(0)` returns nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,

    /// Entries to skip from the front of the filtered, sorted list.
    #[serde(default)]
    pub offset: usize,
}

impl RecallQuery {
    /// A query matching everything in one session.
    pub fn for_session(session_id: impl Into<String>) -> Self {
        Self {
            session_id: Some(session_id.into()),
            ..Self::default()
        }
    }

    /// Restrict to a single step name.
    pub fn with_step(mut self, step: impl Into<String>) -> Self {
        self.step = Some(step.into());
        self
    }

    /// Cap the result count.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Aggregate counts over a set of stored entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecallStats {
    pub total_entries: usize,

    /// Entry count per step name.
    pub entries_by_step: HashMap<String, usize>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub oldest_entry: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub newest_entry: Option<DateTime<Utc>>,

    pub average_entries_per_session: f64,
}

impl RecallStats {
    /// Summarize a batch of entries. An empty batch yields zeroed stats.
    pub fn from_entries(entries: &[StoredEntry]) -> Self {
        if entries.is_empty() {
            return Self::default();
        }

        let mut entries_by_step: HashMap<String, usize> = HashMap::new();
        let mut sessions: HashSet<&str> = HashSet::new();
        let mut oldest = entries[0].timestamp;
        let mut newest = entries[0].timestamp;

        for entry in entries {
            *entries_by_step.entry(entry.step.clone()).or_insert(0) += 1;
            sessions.insert(entry.session_id.as_str());
            if entry.timestamp < oldest {
                oldest = entry.timestamp;
            }
            if entry.timestamp > newest {
                newest = entry.timestamp;
            }
        }

        let session_count = sessions.len().max(1);

        Self {
            total_entries: entries.len(),
            entries_by_step,
            oldest_entry: Some(oldest),
            newest_entry: Some(newest),
            average_entries_per_session: entries.len() as f64 / session_count as f64,
        }
    }
}
