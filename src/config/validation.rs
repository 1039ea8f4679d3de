//! Configuration validation module
//!
//! This module provides validation functions for application configuration
//! to ensure all required settings are properly configured.

use crate::utils::errors::{FailChatError, Result};
use super::settings::MAX_SESSION_TTL_SECONDS;
use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_logging_config(&settings.logging)?;
    validate_session_config(&settings.session)?;
    validate_dialog_config(&settings.dialog)?;

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(FailChatError::Config(
            "Log level is required".to_string()
        ));
    }

    let valid_levels = ["trace", "debug", "info", "warn", "error"];
    if !valid_levels.contains(&config.level.as_str()) {
        return Err(FailChatError::Config(
            format!("Invalid log level: {}. Valid levels: {:?}", config.level, valid_levels)
        ));
    }

    if let Some(dir) = &config.file_dir {
        if dir.trim().is_empty() {
            return Err(FailChatError::Config(
                "Log file directory must not be blank when set".to_string()
            ));
        }
    }

    Ok(())
}

/// Validate session store configuration
fn validate_session_config(config: &super::SessionConfig) -> Result<()> {
    if config.ttl_seconds == 0 {
        return Err(FailChatError::Config(
            "Session TTL must be greater than 0".to_string()
        ));
    }

    if config.ttl_seconds > MAX_SESSION_TTL_SECONDS {
        return Err(FailChatError::Config(
            format!(
                "Session TTL of {}s exceeds the maximum of {}s",
                config.ttl_seconds, MAX_SESSION_TTL_SECONDS
            )
        ));
    }

    Ok(())
}

/// Validate dialog configuration
fn validate_dialog_config(config: &super::DialogConfig) -> Result<()> {
    if config.card_title.trim().is_empty() {
        return Err(FailChatError::Config(
            "Card title is required".to_string()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_rejects_unknown_log_level() {
        let mut settings = Settings::default();
        settings.logging.level = "verbose".to_string();
        assert_matches!(validate_settings(&settings), Err(FailChatError::Config(msg)) if msg.contains("verbose"));
    }

    #[test]
    fn test_rejects_zero_ttl() {
        let mut settings = Settings::default();
        settings.session.ttl_seconds = 0;
        assert_matches!(validate_settings(&settings), Err(FailChatError::Config(_)));
    }

    #[test]
    fn test_ttl_upper_bound() {
        let mut settings = Settings::default();
        settings.session.ttl_seconds = MAX_SESSION_TTL_SECONDS;
        assert!(validate_settings(&settings).is_ok());

        for ttl in [MAX_SESSION_TTL_SECONDS + 1, 10_000_000_000_000, u64::MAX] {
            settings.session.ttl_seconds = ttl;
            assert_matches!(
                validate_settings(&settings),
                Err(FailChatError::Config(msg)) if msg.contains("exceeds the maximum")
            );
        }
    }

    #[test]
    fn test_rejects_blank_card_title() {
        let mut settings = Settings::default();
        settings.dialog.card_title = "  ".to_string();
        assert!(validate_settings(&settings).is_err());
    }
}
