//! Structural validation of write entries and read queries.
//!
//! Pure predicates, no side effects. Rejection is reported by the write/read
//! paths; nothing here raises. `limit`/`offset` negativity and timestamp
//! validity are unrepresentable in the Rust types, so the checks below cover
//! everything that remains expressible.

use memoir_core::{CallEntry, RecallQuery};

/// Whether an entry is fit to send to the remote store.
///
/// Rejects empty or whitespace-only `step`/`session_id`, and `input`/`output`
/// payloads that are not JSON objects.
pub fn validate_entry(entry: &CallEntry) -> bool {
    if entry.step.trim().is_empty() || entry.session_id.trim().is_empty() {
        return false;
    }

    if !entry.input.is_object() || !entry.output.is_object() {
        return false;
    }

    true
}

/// Whether a query is fit to run.
///
/// Provided string filters must not be whitespace-only; a date range must
/// not be inverted. Absent filters impose no constraint.
pub fn validate_query(query: &RecallQuery) -> bool {
    let provided = [
        query.session_id.as_deref(),
        query.user_id.as_deref(),
        query.workflow_type.as_deref(),
        query.step.as_deref(),
    ];
    if provided.iter().flatten().any(|s| s.trim().is_empty()) {
        return false;
    }

    if let (Some(start), Some(end)) = (query.start_date, query.end_date) {
        if start > end {
            return false;
        }
    }

    true
}
