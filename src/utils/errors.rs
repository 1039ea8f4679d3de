//! Error handling for FailChat
//!
//! This module defines the main error types used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for FailChat application
#[derive(Error, Debug)]
pub enum FailChatError {
    #[error("Dialog error: {0}")]
    Dialog(#[from] DialogError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by the dialog engine itself
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DialogError {
    #[error("Unknown intent: {0}")]
    UnknownIntent(String),

    #[error("Invalid dialog stage code: {0}")]
    InvalidStage(i64),
}

/// Result type alias for FailChat operations
pub type Result<T> = std::result::Result<T, FailChatError>;

/// Result type alias for dialog engine operations
pub type DialogResult<T> = std::result::Result<T, DialogError>;

impl FailChatError {
    /// Check if the error is recoverable
    pub fn is_recoverable(&self) -> bool {
        match self {
            FailChatError::Dialog(DialogError::UnknownIntent(_)) => true,
            FailChatError::Dialog(DialogError::InvalidStage(_)) => true,
            FailChatError::Config(_) => false,
            FailChatError::InvalidRequest(_) => true,
            FailChatError::Serialization(_) => true,
            FailChatError::Io(_) => false,
        }
    }

    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            FailChatError::Config(_) => ErrorSeverity::Critical,
            FailChatError::Io(_) => ErrorSeverity::Critical,
            FailChatError::Dialog(DialogError::UnknownIntent(_)) => ErrorSeverity::Warning,
            FailChatError::InvalidRequest(_) => ErrorSeverity::Info,
            _ => ErrorSeverity::Error,
        }
    }

    /// Stable machine-readable code reported to the host
    pub fn code(&self) -> &'static str {
        match self {
            FailChatError::Dialog(DialogError::UnknownIntent(_)) => "unknown_intent",
            FailChatError::Dialog(DialogError::InvalidStage(_)) => "invalid_stage",
            FailChatError::Config(_) => "config",
            FailChatError::InvalidRequest(_) => "invalid_request",
            FailChatError::Serialization(_) => "malformed_request",
            FailChatError::Io(_) => "io",
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

impl std::fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorSeverity::Info => write!(f, "INFO"),
            ErrorSeverity::Warning => write!(f, "WARN"),
            ErrorSeverity::Error => write!(f, "ERROR"),
            ErrorSeverity::Critical => write!(f, "CRITICAL"),
        }
    }
}
