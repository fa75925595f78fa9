//! HTTP remote-store client.
//!
//! Talks to the hosted context store over its JSON API:
//! - `POST /v1/entries` — persist one entry
//! - `POST /v1/entries/search` — fetch raw entries by identity scope
//! - `DELETE /v1/sessions/{id}/entries` — drop one session
//!
//! Reports honest [`StoreError`]s; it carries no timeout of its own — every
//! call is bounded by the engine's timeout race so each outcome reaches the
//! circuit breaker exactly once.

use async_trait::async_trait;
use memoir_core::{CallEntry, ContextStore, RecallQuery, StoreError};
use serde_json::{Value, json};
use tracing::{debug, warn};

const DEFAULT_BASE_URL: &str = "https://api.memoir.dev";

/// reqwest-backed [`ContextStore`] implementation.
pub struct HttpContextStore {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

impl HttpContextStore {
    /// Create a client against the default endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| StoreError::Network(e.to_string()))?;

        Ok(Self {
            base_url: DEFAULT_BASE_URL.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Override the base URL (self-hosted stores, tests, proxies).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn check_status(status: u16, body: String) -> Result<String, StoreError> {
        if status == 401 || status == 403 {
            return Err(StoreError::AuthenticationFailed(
                "Invalid context store API key".into(),
            ));
        }
        if !(200..300).contains(&status) {
            warn!(status, body = %body, "context store API error");
            return Err(StoreError::Api {
                status_code: status,
                message: body,
            });
        }
        Ok(body)
    }
}

/// Pull the entry list out of a search response.
///
/// Accepts the documented shape `{"entries": [...]}` as well as a bare
/// array, which older store versions return.
fn parse_search_response(body: &str) -> Result<Vec<Value>, StoreError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| StoreError::MalformedResponse(e.to_string()))?;

    if let Some(entries) = value.get("entries").and_then(Value::as_array) {
        return Ok(entries.clone());
    }
    if let Some(entries) = value.as_array() {
        return Ok(entries.clone());
    }

    Err(StoreError::MalformedResponse(
        "search response has no entry list".into(),
    ))
}

/// Build the search request body from a query's identity filters.
///
/// `limit`/`offset` are deliberately never forwarded — pagination happens
/// once, locally, after filtering and sorting.
fn search_body(query: &RecallQuery) -> Value {
    let mut body = serde_json::Map::new();
    if let Some(session_id) = &query.session_id {
        body.insert("sessionId".into(), json!(session_id));
    }
    if let Some(user_id) = &query.user_id {
        body.insert("userId".into(), json!(user_id));
    }
    if let Some(workflow_type) = &query.workflow_type {
        body.insert("workflowType".into(), json!(workflow_type));
    }
    if let Some(step) = &query.step {
        body.insert("step".into(), json!(step));
    }
    Value::Object(body)
}

#[async_trait]
impl ContextStore for HttpContextStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn write(&self, entry: &CallEntry) -> Result<(), StoreError> {
        let url = format!("{}/v1/entries", self.base_url);
        debug!(step = %entry.step, session = %entry.session_id, "writing call entry");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(entry)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Self::check_status(status, body)?;
        Ok(())
    }

    async fn read(&self, query: &RecallQuery) -> Result<Vec<Value>, StoreError> {
        let url = format!("{}/v1/entries/search", self.base_url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&search_body(query))
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let body = Self::check_status(status, body)?;
        parse_search_response(&body)
    }

    async fn delete(&self, session_id: &str) -> Result<u64, StoreError> {
        let url = format!("{}/v1/sessions/{session_id}/entries", self.base_url);

        let response = self
            .client
            .delete(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| StoreError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        let body = Self::check_status(status, body)?;

        let deleted = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("deleted").and_then(Value::as_u64))
            .unwrap_or(0);
        Ok(deleted)
    }
}
