//! No-op backend — backs the layer when it is disabled by configuration.

use async_trait::async_trait;
use memoir_core::{CallEntry, ContextStore, RecallQuery, StoreError};
use serde_json::Value;

/// A backend that stores nothing and returns nothing.
pub struct NoopStore;

#[async_trait]
impl ContextStore for NoopStore {
    fn name(&self) -> &str {
        "none"
    }

    async fn write(&self, _entry: &CallEntry) -> Result<(), StoreError> {
        Ok(())
    }

    async fn read(&self, _query: &RecallQuery) -> Result<Vec<Value>, StoreError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _session_id: &str) -> Result<u64, StoreError> {
        Ok(0)
    }
}
