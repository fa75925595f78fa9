//! `memoir search` — Retrieve call history.

use memoir_core::RecallQuery;

pub async fn run(
    session: Option<String>,
    step: Option<String>,
    workflow: Option<String>,
    limit: Option<usize>,
    offset: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let query = RecallQuery {
        session_id: session,
        step,
        workflow_type: workflow,
        limit,
        offset,
        ..RecallQuery::default()
    };

    let engine = super::engine()?;
    let entries = engine.retrieve(query).await;

    if entries.is_empty() {
        println!("No entries.");
        return Ok(());
    }

    println!("{} entries:", entries.len());
    for entry in &entries {
        println!(
            "  [{}] {} — session {} ({})",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.step,
            entry.session_id,
            entry.id,
        );
    }
    println!("\n{}", serde_json::to_string_pretty(&entries)?);
    Ok(())
}
