//! Application settings management
//!
//! This module defines the configuration structure and provides methods
//! for loading settings from TOML files and environment variables.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Prefix for environment overrides, e.g. `FAILCHAT__DIALOG__END_SESSION_AFTER_CALL`
pub const ENV_PREFIX: &str = "FAILCHAT";

/// Longest session lifetime accepted by validation (one week)
pub const MAX_SESSION_TTL_SECONDS: u64 = 7 * 24 * 60 * 60;

/// Main application configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub session: SessionConfig,
    pub dialog: DialogConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// Directory for a daily rolling log file; stderr only when unset
    pub file_dir: Option<String>,
    pub json: bool,
    /// Log each request and response envelope
    pub log_requests: bool,
    /// Time each turn
    pub log_performance: bool,
    pub log_errors: bool,
}

/// Session store configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SessionConfig {
    pub ttl_seconds: u64,
}

/// Dialog behaviour switches
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DialogConfig {
    /// Close the session once the call to the contact is confirmed
    pub end_session_after_call: bool,
    pub unknown_intent: UnknownIntentPolicy,
    pub card_title: String,
}

/// What the host does with an intent the dialog does not recognise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UnknownIntentPolicy {
    /// Answer with a "didn't understand" prompt and keep the session open
    #[default]
    Fallback,
    /// Surface the error to the caller
    Reject,
}

impl Settings {
    /// Load settings from configuration file and environment variables
    pub fn new() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name("config").required(false))
    }

    /// Load settings from an explicit file, still honouring environment overrides
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path.as_ref()).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        let settings = config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Validate configuration settings
    pub fn validate(&self) -> Result<(), crate::utils::errors::FailChatError> {
        super::validation::validate_settings(self)
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file_dir: None,
            json: false,
            log_requests: true,
            log_performance: true,
            log_errors: true,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { ttl_seconds: 3600 }
    }
}

impl Default for DialogConfig {
    fn default() -> Self {
        Self {
            end_session_after_call: false,
            unknown_intent: UnknownIntentPolicy::Fallback,
            card_title: "Fail Chat".to_string(),
        }
    }
}
