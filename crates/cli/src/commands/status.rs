//! `memoir status` — Show layer health and configuration.

use memoir_config::RecallConfig;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = RecallConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;
    let engine = memoir_recall::RecallEngine::from_config(config.clone());
    let health = engine.health();

    println!("memoir status");
    println!("=============");
    println!("  Config dir:  {}", RecallConfig::config_dir().display());
    println!("  Enabled:     {}", config.enabled);
    println!("  API key:     {}", if config.has_api_key() { "set" } else { "missing" });
    println!(
        "  Endpoint:    {}",
        config.endpoint.as_deref().unwrap_or("(default)")
    );
    println!("  Timeout:     {}ms", config.timeout_ms);
    println!("  Backend:     {}", engine.backend_name());
    println!();
    println!("  Mode:        {}", health.mode);
    println!("  Available:   {}", health.is_available);
    println!("  Failures:    {}", health.failure_count);

    let config_path = RecallConfig::config_dir().join("config.toml");
    if config_path.exists() {
        println!("\n  ✅ Config file found");
    } else {
        println!("\n  ⚠️  No config file — run `memoir onboard` first");
    }

    Ok(())
}
