//! Circuit breaker — gates whether a remote call is attempted at all.
//!
//! Tracks consecutive backend failures. Once [`FAILURE_THRESHOLD`] is
//! reached, attempts are suppressed until [`RECOVERY_TIMEOUT`] has elapsed
//! since the last failure; the first attempt after that is the probe. There
//! is no separate half-open state — the counter resets to zero when the
//! window elapses, and a failed probe starts counting from zero again.
//!
//! Elapsed time uses `tokio::time::Instant` so tests can drive recovery with
//! the paused clock; the wall-clock stamps exposed in [`BreakerSnapshot`]
//! are for observability only.

use chrono::{DateTime, Utc};
use std::sync::Mutex;
use std::time::Duration;
use tokio::time::Instant;

/// Consecutive failures before the circuit opens.
pub const FAILURE_THRESHOLD: u32 = 5;

/// How long the circuit stays open before allowing a probe.
pub const RECOVERY_TIMEOUT: Duration = Duration::from_secs(60);

/// Failure-gating state machine shared by every write and read path.
#[derive(Debug, Default)]
pub struct CircuitBreaker {
    inner: Mutex<BreakerState>,
}

#[derive(Debug, Default)]
struct BreakerState {
    failure_count: u32,
    last_failure_at: Option<Instant>,
    last_success: Option<DateTime<Utc>>,
    last_failure: Option<DateTime<Utc>>,
}

/// A point-in-time copy of the breaker counters.
#[derive(Debug, Clone)]
pub struct BreakerSnapshot {
    pub failure_count: u32,
    pub healthy: bool,
    pub last_success: Option<DateTime<Utc>>,
    pub last_failure: Option<DateTime<Utc>>,
}

impl CircuitBreaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a remote call should be attempted right now.
    ///
    /// Returns true while the failure count is below the threshold. Once the
    /// circuit is open, returns false until the recovery window has elapsed;
    /// at that point the counter resets and the call proceeds as a probe —
    /// permission to try again, not a promise of success.
    pub fn should_attempt(&self) -> bool {
        let mut state = self.inner.lock().unwrap();

        if state.failure_count < FAILURE_THRESHOLD {
            return true;
        }

        match state.last_failure_at {
            Some(at) if at.elapsed() > RECOVERY_TIMEOUT => {
                tracing::info!(
                    elapsed_secs = at.elapsed().as_secs(),
                    "circuit recovery window elapsed, allowing probe"
                );
                state.failure_count = 0;
                true
            }
            _ => false,
        }
    }

    /// Record a successful backend call.
    pub fn record_success(&self) {
        let mut state = self.inner.lock().unwrap();
        state.failure_count = 0;
        state.last_success = Some(Utc::now());
    }

    /// Record a failed or timed-out backend call.
    pub fn record_failure(&self) {
        let mut state = self.inner.lock().unwrap();
        state.failure_count += 1;
        state.last_failure_at = Some(Instant::now());
        state.last_failure = Some(Utc::now());

        if state.failure_count == FAILURE_THRESHOLD {
            tracing::warn!(
                failures = state.failure_count,
                "context store circuit opened"
            );
        }
    }

    /// Whether the failure count is below the threshold.
    pub fn is_healthy(&self) -> bool {
        self.inner.lock().unwrap().failure_count < FAILURE_THRESHOLD
    }

    /// Copy out the current counters.
    pub fn snapshot(&self) -> BreakerSnapshot {
        let state = self.inner.lock().unwrap();
        BreakerSnapshot {
            failure_count: state.failure_count,
            healthy: state.failure_count < FAILURE_THRESHOLD,
            last_success: state.last_success,
            last_failure: state.last_failure,
        }
    }
}
