//! `memoir record` — Store one call entry.

use memoir_core::CallEntry;

pub async fn run(
    step: String,
    session: String,
    input: String,
    output: String,
    user: Option<String>,
    workflow: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let input: serde_json::Value =
        serde_json::from_str(&input).map_err(|e| format!("--input is not valid JSON: {e}"))?;
    let output: serde_json::Value =
        serde_json::from_str(&output).map_err(|e| format!("--output is not valid JSON: {e}"))?;

    let mut entry = CallEntry::new(step, session, input, output);
    if let Some(user) = user {
        entry = entry.with_user(user);
    }
    if let Some(workflow) = workflow {
        entry = entry.with_workflow(workflow);
    }

    let engine = super::engine()?;
    if !engine.is_available() {
        println!("⚠️  Layer not available ({}); the write will be skipped", engine.health().mode);
    }
    engine.store(entry).await;
    println!("Recorded.");
    Ok(())
}
