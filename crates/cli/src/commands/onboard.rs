//! `memoir onboard` — Initialize configuration.

use memoir_config::RecallConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config_dir = RecallConfig::config_dir();
    let config_path = config_dir.join("config.toml");

    if config_path.exists() {
        println!("Config already exists at {}", config_path.display());
        return Ok(());
    }

    std::fs::create_dir_all(&config_dir)
        .map_err(|e| format!("Failed to create {}: {e}", config_dir.display()))?;
    std::fs::write(&config_path, RecallConfig::default_toml())
        .map_err(|e| format!("Failed to write {}: {e}", config_path.display()))?;

    println!("Wrote default config to {}", config_path.display());
    println!("Set `enabled = true` and an `api_key` (or MEMOIR_API_KEY) to go live.");
    Ok(())
}
