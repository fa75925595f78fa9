//! Local query engine — filter, order, and paginate normalized entries.
//!
//! Runs entirely after the (unreliable) fetch: the backend returns whatever
//! loosely matches, and this module applies the authoritative semantics.
//! Pagination comes strictly after filtering and sorting so an `offset`
//! never skips entries the filter would have kept.

use memoir_core::{RecallQuery, StoredEntry};

/// Apply a query: filter, sort newest-first, then offset/limit.
pub fn apply(mut entries: Vec<StoredEntry>, query: &RecallQuery) -> Vec<StoredEntry> {
    entries.retain(|entry| matches(entry, query));

    // stable: ties keep their retrieval order
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    let iter = entries.into_iter().skip(query.offset);
    match query.limit {
        Some(limit) => iter.take(limit).collect(),
        None => iter.collect(),
    }
}

/// An entry matches iff every *provided* filter field agrees with it.
fn matches(entry: &StoredEntry, query: &RecallQuery) -> bool {
    if let Some(session_id) = &query.session_id {
        if &entry.session_id != session_id {
            return false;
        }
    }

    if let Some(user_id) = &query.user_id {
        if entry.user_id.as_ref() != Some(user_id) {
            return false;
        }
    }

    if let Some(workflow_type) = &query.workflow_type {
        if entry.workflow_type.as_ref() != Some(workflow_type) {
            return false;
        }
    }

    if let Some(step) = &query.step {
        if &entry.step != step {
            return false;
        }
    }

    if let Some(start) = query.start_date {
        if entry.timestamp < start {
            return false;
        }
    }

    if let Some(end) = query.end_date {
        if entry.timestamp > end {
            return false;
        }
    }

    true
}
