//! Call-history records — what the application writes and what comes back.
//!
//! A [`CallEntry`] is the caller-owned write input: one processing step with
//! its inputs and outputs, keyed by session. A [`StoredEntry`] is the same
//! record after the remote store has accepted it — it additionally carries
//! the backend-assigned id and whatever opaque metadata the backend attached.
//! Stored entries are produced only by normalization and never mutated.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A single call-history record, as submitted by the application.
///
/// `input` and `output` are kept loosely typed (`serde_json::Value`) because
/// they cross the process boundary as-is; the validator enforces that both
/// are JSON objects before anything goes on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallEntry {
    /// Name of the processing step (e.g. "summarize_document").
    pub step: String,

    /// Step input payload. Must be a JSON object.
    pub input: Value,

    /// Step output payload. Must be a JSON object.
    pub output: Value,

    /// Session this call belongs to.
    pub session_id: String,

    /// Optional end-user identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Optional workflow classification (e.g. "document_generation").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<String>,

    /// When the call happened.
    pub timestamp: DateTime<Utc>,

    /// Free-form caller metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,
}

impl CallEntry {
    /// Create an entry for the given step and session, stamped now.
    pub fn new(
        step: impl Into<String>,
        session_id: impl Into<String>,
        input: Value,
        output: Value,
    ) -> Self {
        Self {
            step: step.into(),
            input,
            output,
            session_id: session_id.into(),
            user_id: None,
            workflow_type: None,
            timestamp: Utc::now(),
            metadata: None,
        }
    }

    /// Attach a user id.
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attach a workflow type.
    pub fn with_workflow(mut self, workflow_type: impl Into<String>) -> Self {
        self.workflow_type = Some(workflow_type.into());
        self
    }

    /// Attach caller metadata.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// A call-history record as persisted by the remote store.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredEntry {
    /// Backend-assigned identifier. Immutable.
    pub id: String,

    /// Name of the processing step.
    pub step: String,

    /// Step input payload.
    pub input: Value,

    /// Step output payload.
    pub output: Value,

    /// Session this call belongs to.
    pub session_id: String,

    /// Optional end-user identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Optional workflow classification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workflow_type: Option<String>,

    /// When the call happened.
    pub timestamp: DateTime<Utc>,

    /// Free-form caller metadata.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Value>,

    /// Opaque backend-attached fields preserved verbatim.
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub backend_metadata: serde_json::Map<String, Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn call_entry_builder() {
        let entry = CallEntry::new(
            "summarize_document",
            "sess_42",
            json!({"document": "quarterly report"}),
            json!({"summary": "revenue up"}),
        )
        .with_user("user_7")
        .with_workflow("document_generation");

        assert_eq!(entry.step, "summarize_document");
        assert_eq!(entry.session_id, "sess_42");
        assert_eq!(entry.user_id.as_deref(), Some("user_7"));
        assert_eq!(entry.workflow_type.as_deref(), Some("document_generation"));
        assert!(entry.metadata.is_none());
    }

    #[test]
    fn call_entry_wire_names_are_camel_case() {
        let entry = CallEntry::new("step", "s1", json!({}), json!({}))
            .with_workflow("chat");
        let json = serde_json::to_string(&entry).unwrap();
        assert!(json.contains("\"sessionId\""));
        assert!(json.contains("\"workflowType\""));
        // absent options are omitted entirely
        assert!(!json.contains("userId"));
    }

    #[test]
    fn stored_entry_roundtrip() {
        let mut backend_metadata = serde_json::Map::new();
        backend_metadata.insert("revision".into(), json!(3));

        let entry = StoredEntry {
            id: "ent_001".into(),
            step: "transcribe".into(),
            input: json!({"audio": "a.wav"}),
            output: json!({"text": "hello"}),
            session_id: "sess_1".into(),
            user_id: None,
            workflow_type: Some("voice".into()),
            timestamp: Utc::now(),
            metadata: None,
            backend_metadata,
        };

        let json = serde_json::to_string(&entry).unwrap();
        let parsed: StoredEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.id, "ent_001");
        assert_eq!(parsed.backend_metadata["revision"], json!(3));
    }
}
