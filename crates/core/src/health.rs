//! Operational health snapshot for the context-memory layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single operational mode derived from config and failure counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceMode {
    /// Enabled and healthy — calls are attempted.
    Active,
    /// Enabled but currently failing — calls are skipped until recovery.
    Degraded,
    /// Turned off by configuration — no remote calls, ever.
    Disabled,
}

impl std::fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Active => write!(f, "active"),
            Self::Degraded => write!(f, "degraded"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// Point-in-time health of the layer. Derived, never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    /// Whether calls would currently be attempted.
    pub is_available: bool,

    /// Whether the failure counter is below the breaker threshold.
    pub is_healthy: bool,

    /// Consecutive backend failures observed.
    pub failure_count: u32,

    pub mode: ServiceMode,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_success: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_failure: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_display() {
        assert_eq!(ServiceMode::Active.to_string(), "active");
        assert_eq!(ServiceMode::Degraded.to_string(), "degraded");
        assert_eq!(ServiceMode::Disabled.to_string(), "disabled");
    }

    #[test]
    fn mode_serializes_snake_case() {
        let json = serde_json::to_string(&ServiceMode::Degraded).unwrap();
        assert_eq!(json, "\"degraded\"");
    }

    #[test]
    fn status_serializes_camel_case() {
        let status = HealthStatus {
            is_available: true,
            is_healthy: true,
            failure_count: 0,
            mode: ServiceMode::Active,
            last_success: Some(Utc::now()),
            last_failure: None,
        };
        let json = serde_json::to_string(&status).unwrap();
        assert!(json.contains("\"isAvailable\":true"));
        assert!(json.contains("\"failureCount\":0"));
        assert!(!json.contains("lastFailure"));
    }
}
