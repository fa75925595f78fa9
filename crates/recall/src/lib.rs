//! Resilient context-memory integration layer.
//!
//! Records application call history (step name, inputs, outputs) into an
//! external, possibly-unreliable context store and retrieves prior history
//! to enrich future requests. The contract every caller gets:
//!
//! - **Writes never block or throw.** [`RecallEngine::store`] returns `()`
//!   once the attempt settles; [`RecallEngine::store_detached`] doesn't even
//!   wait for that.
//! - **Reads degrade to empty.** Validation failures, an open circuit,
//!   timeouts, backend errors, and total parse failures all yield `vec![]`.
//! - **The layer self-protects.** A circuit breaker stops hammering a
//!   failing backend and re-probes after a recovery window.
//!
//! Backend access goes through the [`memoir_core::ContextStore`] trait:
//! [`HttpContextStore`] talks to the real service, [`InMemoryStore`] backs
//! tests and ephemeral sessions, [`NoopStore`] backs the disabled mode.

pub mod breaker;
pub mod client;
pub mod engine;
pub mod health;
pub mod in_memory;
pub mod noop;
pub mod normalize;
pub mod query;
pub mod validate;

pub use breaker::{CircuitBreaker, FAILURE_THRESHOLD, RECOVERY_TIMEOUT};
pub use client::HttpContextStore;
pub use engine::RecallEngine;
pub use in_memory::InMemoryStore;
pub use noop::NoopStore;
