//! RecallEngine — the orchestrating facade over the context store.
//!
//! Every public operation recovers every failure locally: `store` returns
//! `()` no matter what, `retrieve` degrades to an empty list, `clear` to
//! false, `stats` to zeroed stats. The shared pipeline is
//! gate (enabled → validate → breaker) → timeout-bounded backend call →
//! exactly one breaker report.

use crate::breaker::CircuitBreaker;
use crate::client::HttpContextStore;
use crate::noop::NoopStore;
use crate::{health, normalize, query, validate};
use memoir_config::RecallConfig;
use memoir_core::{CallEntry, ContextStore, HealthStatus, RecallQuery, RecallStats, StoredEntry};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// The context-memory facade handed to calling services.
///
/// Cheap to clone; clones share the store, circuit breaker, and counters.
#[derive(Clone)]
pub struct RecallEngine {
    config: RecallConfig,
    store: Arc<dyn ContextStore>,
    breaker: Arc<CircuitBreaker>,
    init_failed: bool,
}

impl RecallEngine {
    /// Build an engine over an explicit backend. The usual entry point for
    /// tests and embedders that bring their own [`ContextStore`].
    pub fn new(config: RecallConfig, store: Arc<dyn ContextStore>) -> Self {
        Self {
            config,
            store,
            breaker: Arc::new(CircuitBreaker::new()),
            init_failed: false,
        }
    }

    /// Build an engine from configuration, wiring the HTTP client.
    ///
    /// A disabled config gets a no-op backend. An enabled config without a
    /// usable client (no API key, or client construction failed) also gets
    /// the no-op backend, but reports degraded health instead of disabled.
    pub fn from_config(config: RecallConfig) -> Self {
        if !config.enabled {
            info!("context memory disabled by configuration");
            return Self::new(config, Arc::new(NoopStore));
        }

        let (store, init_failed): (Arc<dyn ContextStore>, bool) = match &config.api_key {
            Some(api_key) => match HttpContextStore::new(api_key.clone()) {
                Ok(client) => {
                    let client = match &config.endpoint {
                        Some(endpoint) => client.with_base_url(endpoint.clone()),
                        None => client,
                    };
                    (Arc::new(client), false)
                }
                Err(e) => {
                    error!(error = %e, "failed to initialize context store client");
                    (Arc::new(NoopStore), true)
                }
            },
            None => {
                error!("context memory enabled but no API key configured");
                (Arc::new(NoopStore), true)
            }
        };

        let mut engine = Self::new(config, store);
        engine.init_failed = init_failed;
        engine
    }

    /// The backend currently in use.
    pub fn backend_name(&self) -> &str {
        self.store.name()
    }

    fn timeout(&self) -> Duration {
        Duration::from_millis(self.config.timeout_ms)
    }

    /// Record one call entry. Never fails from the caller's perspective;
    /// returns once the attempt (success or not) has settled.
    pub async fn store(&self, entry: CallEntry) {
        if !self.config.enabled {
            return;
        }
        if !validate::validate_entry(&entry) {
            warn!(step = %entry.step, "discarding structurally invalid call entry");
            return;
        }
        if !self.breaker.should_attempt() {
            debug!("context store circuit open, skipping write");
            return;
        }

        match tokio::time::timeout(self.timeout(), self.store.write(&entry)).await {
            Ok(Ok(())) => {
                self.breaker.record_success();
                debug!(step = %entry.step, session = %entry.session_id, "call entry stored");
            }
            Ok(Err(e)) => {
                self.breaker.record_failure();
                warn!(error = %e, "context store write failed");
            }
            Err(_) => {
                self.breaker.record_failure();
                warn!(timeout_ms = self.config.timeout_ms, "context store write timed out");
            }
        }
    }

    /// Fire-and-forget variant of [`store`](Self::store): the write runs on
    /// a detached task sharing this engine's circuit breaker. Safe to call
    /// without ever awaiting anything.
    pub fn store_detached(&self, entry: CallEntry) {
        let engine = self.clone();
        tokio::spawn(async move {
            engine.store(entry).await;
        });
    }

    /// Fetch prior history matching the query. Empty on any failure.
    pub async fn retrieve(&self, query: RecallQuery) -> Vec<StoredEntry> {
        if !self.config.enabled {
            return Vec::new();
        }
        if !validate::validate_query(&query) {
            warn!("discarding structurally invalid recall query");
            return Vec::new();
        }
        if !self.breaker.should_attempt() {
            debug!("context store circuit open, skipping read");
            return Vec::new();
        }

        let raw = match tokio::time::timeout(self.timeout(), self.store.read(&query)).await {
            Ok(Ok(raw)) => {
                self.breaker.record_success();
                raw
            }
            Ok(Err(e)) => {
                self.breaker.record_failure();
                warn!(error = %e, "context store read failed");
                return Vec::new();
            }
            Err(_) => {
                self.breaker.record_failure();
                warn!(timeout_ms = self.config.timeout_ms, "context store read timed out");
                return Vec::new();
            }
        };

        let fetched = raw.len();
        let entries: Vec<StoredEntry> = raw.iter().filter_map(normalize::normalize).collect();
        if entries.len() < fetched {
            debug!(
                dropped = fetched - entries.len(),
                "dropped unnormalizable backend entries"
            );
        }

        query::apply(entries, &query)
    }

    /// Remove all entries for one session. False on any failure.
    ///
    /// The delete is scoped to exactly the given session id, so one caller
    /// can never clear another session's history.
    pub async fn clear(&self, session_id: &str) -> bool {
        if !self.config.enabled {
            return false;
        }
        if session_id.trim().is_empty() {
            warn!("refusing to clear with an empty session id");
            return false;
        }
        if !self.breaker.should_attempt() {
            debug!("context store circuit open, skipping clear");
            return false;
        }

        match tokio::time::timeout(self.timeout(), self.store.delete(session_id)).await {
            Ok(Ok(deleted)) => {
                self.breaker.record_success();
                info!(session = %session_id, deleted, "session history cleared");
                true
            }
            Ok(Err(e)) => {
                self.breaker.record_failure();
                warn!(error = %e, "context store delete failed");
                false
            }
            Err(_) => {
                self.breaker.record_failure();
                warn!(timeout_ms = self.config.timeout_ms, "context store delete timed out");
                false
            }
        }
    }

    /// Aggregate stats for one session, via retrieve-and-summarize.
    /// Zeroed stats on any failure.
    pub async fn stats(&self, session_id: &str) -> RecallStats {
        let entries = self.retrieve(RecallQuery::for_session(session_id)).await;
        RecallStats::from_entries(&entries)
    }

    /// Whether calls would currently be attempted. Synchronous, no I/O.
    pub fn is_available(&self) -> bool {
        self.config.enabled && !self.init_failed && self.breaker.is_healthy()
    }

    /// Current health snapshot. Synchronous, no I/O.
    pub fn health(&self) -> HealthStatus {
        health::report(self.config.enabled, self.init_failed, &self.breaker.snapshot())
    }
}
