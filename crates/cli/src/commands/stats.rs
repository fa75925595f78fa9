//! `memoir stats` — Aggregate counts for a session.

pub async fn run(session: String) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::engine()?;
    let stats = engine.stats(&session).await;

    println!("Stats for session {session}");
    println!("  Total entries: {}", stats.total_entries);
    if let Some(oldest) = stats.oldest_entry {
        println!("  Oldest:        {}", oldest.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(newest) = stats.newest_entry {
        println!("  Newest:        {}", newest.format("%Y-%m-%d %H:%M:%S"));
    }

    if !stats.entries_by_step.is_empty() {
        println!("  By step:");
        let mut steps: Vec<_> = stats.entries_by_step.iter().collect();
        steps.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (step, count) in steps {
            println!("    {step}: {count}");
        }
    }
    Ok(())
}
