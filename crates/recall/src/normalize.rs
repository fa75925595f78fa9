//! Tolerant conversion of raw backend entries into [`StoredEntry`] values.
//!
//! The remote store is loosely typed and occasionally returns partial or
//! garbled records. One malformed entry must never abort a batch, so
//! everything here is per-entry: an entry without a usable id is dropped
//! (logged at warn), a payload that isn't structured data is wrapped rather
//! than discarded, and a missing timestamp defaults to now.

use chrono::{DateTime, TimeZone, Utc};
use memoir_core::StoredEntry;
use serde_json::{Map, Value, json};
use tracing::warn;

/// Top-level fields the canonical representation consumes. Anything else the
/// backend sends is preserved verbatim under `backend_metadata`.
const KNOWN_FIELDS: &[&str] = &[
    "id",
    "step",
    "input",
    "output",
    "sessionId",
    "userId",
    "workflowType",
    "timestamp",
    "metadata",
];

/// Convert one raw backend entry, or drop it.
///
/// Returns `None` only when the entry is unusable: not a JSON object, or
/// missing a non-empty `id`. Every other defect is repaired in place.
pub fn normalize(raw: &Value) -> Option<StoredEntry> {
    let Some(obj) = raw.as_object() else {
        warn!("dropping backend entry: not an object");
        return None;
    };

    let id = match obj.get("id").and_then(Value::as_str) {
        Some(id) if !id.trim().is_empty() => id.to_string(),
        _ => {
            warn!("dropping backend entry: missing id");
            return None;
        }
    };

    let step = obj
        .get("step")
        .and_then(Value::as_str)
        .unwrap_or("unknown")
        .to_string();

    let session_id = obj
        .get("sessionId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    let user_id = obj
        .get("userId")
        .and_then(Value::as_str)
        .map(str::to_string);

    let workflow_type = obj
        .get("workflowType")
        .and_then(Value::as_str)
        .map(str::to_string);

    let timestamp = obj
        .get("timestamp")
        .and_then(parse_timestamp)
        .unwrap_or_else(Utc::now);

    let mut backend_metadata = Map::new();
    for (key, value) in obj {
        if !KNOWN_FIELDS.contains(&key.as_str()) {
            backend_metadata.insert(key.clone(), value.clone());
        }
    }

    Some(StoredEntry {
        id,
        step,
        input: coerce_payload(obj.get("input")),
        output: coerce_payload(obj.get("output")),
        session_id,
        user_id,
        workflow_type,
        timestamp,
        metadata: obj.get("metadata").cloned(),
        backend_metadata,
    })
}

/// Payloads must be objects. Anything else the backend hands back is kept by
/// wrapping it under a generic key instead of throwing the entry away.
fn coerce_payload(value: Option<&Value>) -> Value {
    match value {
        Some(v) if v.is_object() => v.clone(),
        Some(Value::Null) | None => json!({}),
        Some(other) => json!({ "raw": other.clone() }),
    }
}

/// Accept RFC 3339 strings or epoch milliseconds.
fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    if let Some(s) = value.as_str() {
        return DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc));
    }
    if let Some(millis) = value.as_i64() {
        return Utc.timestamp_millis_opt(millis).single();
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn raw_entry() -> Value {
        json!({
            "id": "ent_1",
            "step": "summarize",
            "input": {"doc": "report"},
            "output": {"summary": "fine"},
            "sessionId": "sess_1",
            "userId": "user_9",
            "workflowType": "documents",
            "timestamp": "2026-04-02T09:30:00Z",
        })
    }

    #[test]
    fn well_formed_entry_normalizes() {
        let entry = normalize(&raw_entry()).unwrap();
        assert_eq!(entry.id, "ent_1");
        assert_eq!(entry.step, "summarize");
        assert_eq!(entry.session_id, "sess_1");
        assert_eq!(entry.user_id.as_deref(), Some("user_9"));
        assert_eq!(entry.workflow_type.as_deref(), Some("documents"));
        assert_eq!(entry.timestamp.to_rfc3339(), "2026-04-02T09:30:00+00:00");
        assert!(entry.backend_metadata.is_empty());
    }

    #[test]
    fn missing_id_drops_entry() {
        let mut raw = raw_entry();
        raw.as_object_mut().unwrap().remove("id");
        assert!(normalize(&raw).is_none());
    }

    #[test]
    fn blank_id_drops_entry() {
        let mut raw = raw_entry();
        raw["id"] = json!("  ");
        assert!(normalize(&raw).is_none());
    }

    #[test]
    fn non_object_entry_drops() {
        assert!(normalize(&json!("garbage")).is_none());
        assert!(normalize(&json!(42)).is_none());
        assert!(normalize(&Value::Null).is_none());
    }

    #[test]
    fn garbled_payload_is_wrapped_not_dropped() {
        let mut raw = raw_entry();
        raw["input"] = json!("plain text the backend mangled");
        let entry = normalize(&raw).unwrap();
        assert_eq!(entry.input["raw"], json!("plain text the backend mangled"));
        // the other payload is untouched
        assert_eq!(entry.output["summary"], json!("fine"));
    }

    #[test]
    fn array_payload_is_wrapped() {
        let mut raw = raw_entry();
        raw["output"] = json!([1, 2]);
        let entry = normalize(&raw).unwrap();
        assert_eq!(entry.output["raw"], json!([1, 2]));
    }

    #[test]
    fn missing_payloads_become_empty_objects() {
        let raw = json!({"id": "ent_2", "sessionId": "s"});
        let entry = normalize(&raw).unwrap();
        assert_eq!(entry.input, json!({}));
        assert_eq!(entry.output, json!({}));
    }

    #[test]
    fn missing_timestamp_defaults_to_now() {
        let before = Utc::now();
        let raw = json!({"id": "ent_3", "step": "x", "sessionId": "s"});
        let entry = normalize(&raw).unwrap();
        assert!(entry.timestamp >= before);
        assert!(entry.timestamp <= Utc::now());
    }

    #[test]
    fn unparsable_timestamp_defaults_to_now() {
        let mut raw = raw_entry();
        raw["timestamp"] = json!("not-a-date");
        let before = Utc::now();
        let entry = normalize(&raw).unwrap();
        assert!(entry.timestamp >= before);
    }

    #[test]
    fn epoch_millis_timestamp_accepted() {
        let mut raw = raw_entry();
        raw["timestamp"] = json!(1_767_225_600_000_i64); // 2026-01-01T00:00:00Z
        let entry = normalize(&raw).unwrap();
        assert_eq!(entry.timestamp.to_rfc3339(), "2026-01-01T00:00:00+00:00");
    }

    #[test]
    fn missing_step_becomes_unknown() {
        let raw = json!({"id": "ent_4", "sessionId": "s"});
        let entry = normalize(&raw).unwrap();
        assert_eq!(entry.step, "unknown");
    }

    #[test]
    fn extra_fields_are_preserved_as_backend_metadata() {
        let mut raw = raw_entry();
        raw["score"] = json!(0.87);
        raw["revision"] = json!(2);
        let entry = normalize(&raw).unwrap();
        assert_eq!(entry.backend_metadata["score"], json!(0.87));
        assert_eq!(entry.backend_metadata["revision"], json!(2));
        assert!(!entry.backend_metadata.contains_key("sessionId"));
    }

    #[test]
    fn one_bad_entry_never_poisons_a_batch() {
        let batch = vec![
            raw_entry(),
            json!({"sessionId": "s"}), // no id
            {
                let mut ok = raw_entry();
                ok["id"] = json!("ent_5");
                ok
            },
        ];
        let normalized: Vec<_> = batch.iter().filter_map(normalize).collect();
        assert_eq!(normalized.len(), 2);
    }
}
