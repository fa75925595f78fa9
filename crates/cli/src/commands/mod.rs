//! CLI subcommand implementations.

pub mod forget;
pub mod onboard;
pub mod record;
pub mod search;
pub mod stats;
pub mod status;

use memoir_config::RecallConfig;
use memoir_recall::RecallEngine;

/// Load config and build the engine every command runs against.
pub(crate) fn engine() -> Result<RecallEngine, Box<dyn std::error::Error>> {
    let config = RecallConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    Ok(RecallEngine::from_config(config))
}
