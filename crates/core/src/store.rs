//! ContextStore trait — the pluggable remote-backend boundary.
//!
//! The context store is an external, possibly-unreliable service. This trait
//! is its capability set: write one entry, read raw entries, delete a
//! session. Implementations report honest errors; resilience (timeouts,
//! circuit breaking, tolerant parsing) lives above this seam in
//! `memoir-recall`.

use crate::entry::CallEntry;
use crate::error::StoreError;
use crate::query::RecallQuery;
use async_trait::async_trait;

/// The core backend trait.
///
/// Implementations: HTTP remote store, in-memory (for testing and ephemeral
/// sessions), no-op (disabled).
#[async_trait]
pub trait ContextStore: Send + Sync {
    /// The backend name (e.g. "http", "in_memory", "none").
    fn name(&self) -> &str;

    /// Persist one call entry.
    async fn write(&self, entry: &CallEntry) -> Result<(), StoreError>;

    /// Fetch raw entries, loosely matching the query's identity filters.
    ///
    /// Returns backend JSON verbatim — entries may be partial or malformed;
    /// the caller normalizes and re-filters. Implementations may scope the
    /// fetch by `session_id` / `user_id` / `workflow_type` / `step` but must
    /// not apply `limit` or `offset`; pagination happens once, locally,
    /// after filtering and sorting.
    async fn read(&self, query: &RecallQuery) -> Result<Vec<serde_json::Value>, StoreError>;

    /// Remove every entry belonging to one session. Returns the count.
    async fn delete(&self, session_id: &str) -> Result<u64, StoreError>;
}
