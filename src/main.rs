//! FailChat skill host
//!
//! Reads one JSON request envelope per line on stdin and writes exactly one
//! JSON response envelope per non-blank line on stdout. Failed or malformed
//! requests get an envelope with an `error` body. Logs go to stderr.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::info;

use FailChat::{
    config::Settings,
    handlers::SkillHandler,
    state::{InMemorySessionStore, SessionJanitor},
    utils::logging,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new().context("Failed to load configuration")?;
    settings.validate()?;

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", FailChat::info());

    // Initialize session state
    let store = InMemorySessionStore::new(&settings.session);
    let cleanup_every = Duration::from_secs(settings.session.ttl_seconds.clamp(1, 60));
    let mut janitor = SessionJanitor::new(store.clone(), cleanup_every);
    janitor.start_cleanup();

    let handler = SkillHandler::new(&settings, Arc::new(store.clone()));
    info!(
        end_session_after_call = settings.dialog.end_session_after_call,
        unknown_intent = ?settings.dialog.unknown_intent,
        "Skill host is ready, reading requests from stdin"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        // Errors are logged by the handler and reported in the envelope
        let response = handler.handle_line(line).await;
        let mut out = response.to_json()?;
        out.push('\n');
        stdout.write_all(out.as_bytes()).await?;
        stdout.flush().await?;
    }

    janitor.stop_cleanup();
    let stats = store.get_stats().await;
    info!(
        active_sessions = stats.active_sessions,
        expired_sessions = stats.expired_sessions,
        "Input closed, FailChat host has been shut down."
    );

    Ok(())
}
