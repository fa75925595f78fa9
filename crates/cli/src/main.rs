//! memoir CLI — the main entry point.
//!
//! Commands:
//! - `onboard` — Initialize config
//! - `status`  — Show layer health and configuration
//! - `record`  — Store one call entry
//! - `search`  — Retrieve call history
//! - `forget`  — Clear a session's history
//! - `stats`   — Aggregate counts for a session

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "memoir",
    about = "memoir — resilient context-memory for AI applications",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Onboard,

    /// Show layer health and configuration
    Status,

    /// Store one call entry
    Record {
        /// Step name (e.g. "summarize_document")
        step: String,

        /// Session id the entry belongs to
        #[arg(short, long)]
        session: String,

        /// Step input as a JSON object
        #[arg(short, long, default_value = "{}")]
        input: String,

        /// Step output as a JSON object
        #[arg(short, long, default_value = "{}")]
        output: String,

        /// Optional user id
        #[arg(short, long)]
        user: Option<String>,

        /// Optional workflow type
        #[arg(short, long)]
        workflow: Option<String>,
    },

    /// Retrieve call history
    Search {
        /// Restrict to a session
        #[arg(short, long)]
        session: Option<String>,

        /// Restrict to a step name
        #[arg(long)]
        step: Option<String>,

        /// Restrict to a workflow type
        #[arg(short, long)]
        workflow: Option<String>,

        /// Maximum entries to print
        #[arg(short, long)]
        limit: Option<usize>,

        /// Entries to skip
        #[arg(short, long, default_value_t = 0)]
        offset: usize,
    },

    /// Clear a session's history
    Forget {
        /// Session id to clear
        session: String,
    },

    /// Aggregate counts for a session
    Stats {
        /// Session id to summarize
        session: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Onboard => commands::onboard::run().await?,
        Commands::Status => commands::status::run().await?,
        Commands::Record {
            step,
            session,
            input,
            output,
            user,
            workflow,
        } => commands::record::run(step, session, input, output, user, workflow).await?,
        Commands::Search {
            session,
            step,
            workflow,
            limit,
            offset,
        } => commands::search::run(session, step, workflow, limit, offset).await?,
        Commands::Forget { session } => commands::forget::run(session).await?,
        Commands::Stats { session } => commands::stats::run(session).await?,
    }

    Ok(())
}
