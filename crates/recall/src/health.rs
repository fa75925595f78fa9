//! Health reporting — derives one operational mode from config and counters.

use crate::breaker::BreakerSnapshot;
use memoir_core::{HealthStatus, ServiceMode};

/// Derive the current health. Pure — reads counters, mutates nothing.
///
/// `disabled` when configuration turned the layer off; `degraded` when it is
/// on but the breaker is unhealthy or initialization failed; `active`
/// otherwise.
pub fn report(enabled: bool, init_failed: bool, snapshot: &BreakerSnapshot) -> HealthStatus {
    let mode = if !enabled {
        ServiceMode::Disabled
    } else if init_failed || !snapshot.healthy {
        ServiceMode::Degraded
    } else {
        ServiceMode::Active
    };

    HealthStatus {
        is_available: enabled && snapshot.healthy && !init_failed,
        is_healthy: snapshot.healthy,
        failure_count: snapshot.failure_count,
        mode,
        last_success: snapshot.last_success,
        last_failure: snapshot.last_failure,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breaker::{CircuitBreaker, FAILURE_THRESHOLD};

    #[test]
    fn disabled_config_wins() {
        let breaker = CircuitBreaker::new();
        let status = report(false, false, &breaker.snapshot());
        assert_eq!(status.mode, ServiceMode::Disabled);
        assert!(!status.is_available);
        // healthy counters don't make a disabled layer available
        assert!(status.is_healthy);
    }

    #[test]
    fn healthy_enabled_is_active() {
        let breaker = CircuitBreaker::new();
        breaker.record_success();
        let status = report(true, false, &breaker.snapshot());
        assert_eq!(status.mode, ServiceMode::Active);
        assert!(status.is_available);
        assert!(status.last_success.is_some());
    }

    #[test]
    fn threshold_failures_degrade() {
        let breaker = CircuitBreaker::new();
        for _ in 0..FAILURE_THRESHOLD {
            breaker.record_failure();
        }
        let status = report(true, false, &breaker.snapshot());
        assert_eq!(status.mode, ServiceMode::Degraded);
        assert!(!status.is_available);
        assert_eq!(status.failure_count, FAILURE_THRESHOLD);
    }

    #[test]
    fn failed_initialization_degrades_despite_healthy_counters() {
        let breaker = CircuitBreaker::new();
        let status = report(true, true, &breaker.snapshot());
        assert_eq!(status.mode, ServiceMode::Degraded);
        assert!(!status.is_available);
        assert!(status.is_healthy);
    }

    #[test]
    fn failures_below_threshold_stay_active() {
        let breaker = CircuitBreaker::new();
        breaker.record_failure();
        breaker.record_failure();
        let status = report(true, false, &breaker.snapshot());
        assert_eq!(status.mode, ServiceMode::Active);
        assert!(status.is_available);
        assert_eq!(status.failure_count, 2);
    }
}
