//! `memoir forget` — Clear a session's history.

pub async fn run(session: String) -> Result<(), Box<dyn std::error::Error>> {
    let engine = super::engine()?;

    if engine.clear(&session).await {
        println!("Cleared session {session}.");
    } else {
        println!("Could not clear session {session} (layer {}).", engine.health().mode);
    }
    Ok(())
}
