//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging utilities
//! for the FailChat application.

use tracing::{debug, info};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

use crate::config::LoggingConfig;
use crate::state::DialogStage;
use crate::utils::errors::{FailChatError, Result};

/// Initialize logging based on configuration
///
/// Logs go to stderr so stdout stays free for response envelopes. The returned
/// guard must be held for as long as the file writer should keep flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = tracing_subscriber::EnvFilter::try_new(&config.level)
        .map_err(|e| FailChatError::Config(format!("Invalid log filter '{}': {}", config.level, e)))?;

    let stderr_layer = if config.json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };

    let (file_layer, guard) = match &config.file_dir {
        Some(dir) => {
            let file_appender = tracing_appender::rolling::daily(dir, "failchat.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(non_blocking)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| FailChatError::Config(format!("Logging already initialized: {}", e)))?;

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log a dialog stage change
pub fn log_transition(session_id: &str, intent: &str, from: Option<DialogStage>, to: Option<DialogStage>) {
    if from == to {
        debug!(session_id = session_id, intent = intent, stage = ?to, "Dialog stage unchanged");
    } else {
        info!(
            session_id = session_id,
            intent = intent,
            from = ?from,
            to = ?to,
            "Dialog stage changed"
        );
    }
}
