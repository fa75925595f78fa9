//! In-memory backend — useful for testing and ephemeral sessions.
//!
//! Stores entries as the same raw JSON a remote store would return, so the
//! full normalize path is exercised even against this backend.

use async_trait::async_trait;
use memoir_core::{CallEntry, ContextStore, RecallQuery, StoreError};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// A backend that keeps raw entries in a Vec.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    entries: Arc<RwLock<Vec<Value>>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inject a raw backend record verbatim, id and all. Lets tests seed
    /// partial or malformed data the way a flaky remote store would.
    pub async fn seed_raw(&self, raw: Value) {
        self.entries.write().await.push(raw);
    }

    /// Number of stored entries.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds nothing.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl ContextStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn write(&self, entry: &CallEntry) -> Result<(), StoreError> {
        let mut raw = serde_json::to_value(entry)
            .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;
        raw["id"] = Value::String(Uuid::new_v4().to_string());
        self.entries.write().await.push(raw);
        Ok(())
    }

    async fn read(&self, query: &RecallQuery) -> Result<Vec<Value>, StoreError> {
        let entries = self.entries.read().await;
        let scoped: Vec<Value> = entries
            .iter()
            .filter(|raw| scope_matches(raw, query))
            .cloned()
            .collect();
        Ok(scoped)
    }

    async fn delete(&self, session_id: &str) -> Result<u64, StoreError> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|raw| raw.get("sessionId").and_then(Value::as_str) != Some(session_id));
        Ok((before - entries.len()) as u64)
    }
}

/// The identity scope a real backend would honor server-side. Entries whose
/// fields are unreadable stay in scope — the normalizer decides their fate.
fn scope_matches(raw: &Value, query: &RecallQuery) -> bool {
    let field_matches = |key: &str, expected: &Option<String>| match expected {
        Some(want) => match raw.get(key).and_then(Value::as_str) {
            Some(have) => have == want,
            None => true,
        },
        None => true,
    };

    field_matches("sessionId", &query.session_id)
        && field_matches("userId", &query.user_id)
        && field_matches("workflowType", &query.workflow_type)
        && field_matches("step", &query.step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_entry(step: &str, session: &str) -> CallEntry {
        CallEntry::new(step, session, json!({"k": 1}), json!({"v": 2}))
    }

    #[tokio::test]
    async fn write_assigns_an_id() {
        let store = InMemoryStore::new();
        store.write(&test_entry("chat", "s1")).await.unwrap();

        let raw = store.read(&RecallQuery::default()).await.unwrap();
        assert_eq!(raw.len(), 1);
        assert!(raw[0]["id"].as_str().is_some_and(|id| !id.is_empty()));
    }

    #[tokio::test]
    async fn read_scopes_by_session() {
        let store = InMemoryStore::new();
        store.write(&test_entry("chat", "s1")).await.unwrap();
        store.write(&test_entry("chat", "s2")).await.unwrap();

        let raw = store.read(&RecallQuery::for_session("s1")).await.unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0]["sessionId"], json!("s1"));
    }

    #[tokio::test]
    async fn read_never_paginates() {
        let store = InMemoryStore::new();
        for _ in 0..4 {
            store.write(&test_entry("chat", "s1")).await.unwrap();
        }

        // a limit on the query must not shrink the raw fetch
        let query = RecallQuery::for_session("s1").with_limit(1);
        let raw = store.read(&query).await.unwrap();
        assert_eq!(raw.len(), 4);
    }

    #[tokio::test]
    async fn delete_touches_only_the_given_session() {
        let store = InMemoryStore::new();
        store.write(&test_entry("chat", "s1")).await.unwrap();
        store.write(&test_entry("chat", "s1")).await.unwrap();
        store.write(&test_entry("chat", "s2")).await.unwrap();

        let deleted = store.delete("s1").await.unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(store.len().await, 1);

        let rest = store.read(&RecallQuery::default()).await.unwrap();
        assert_eq!(rest[0]["sessionId"], json!("s2"));
    }

    #[tokio::test]
    async fn seeded_raw_entries_come_back_verbatim() {
        let store = InMemoryStore::new();
        store.seed_raw(json!({"sessionId": "s1", "mangled": true})).await;

        let raw = store.read(&RecallQuery::for_session("s1")).await.unwrap();
        assert_eq!(raw.len(), 1);
        assert_eq!(raw[0]["mangled"], json!(true));
    }
}
