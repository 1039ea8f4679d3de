//! Logging middleware
//!
//! This module provides logging middleware for tracking skill requests,
//! performance metrics, and debugging information.

use std::time::Instant;

use tracing::{debug, error, info, instrument, warn, Span};

use crate::config::LoggingConfig;
use crate::handlers::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::utils::errors::{ErrorSeverity, FailChatError};
use crate::utils::helpers::truncate_text;

/// Logging middleware for skill interactions
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    log_requests: bool,
    log_performance: bool,
    log_errors: bool,
}

impl LoggingMiddleware {
    /// Create a new LoggingMiddleware instance
    pub fn new(log_requests: bool, log_performance: bool, log_errors: bool) -> Self {
        Self {
            log_requests,
            log_performance,
            log_errors,
        }
    }

    /// Log incoming request
    #[instrument(skip(self, request), fields(session_id = %request.session_id))]
    pub fn log_request(&self, request: &RequestEnvelope, request_id: &str) {
        if !self.log_requests {
            return;
        }

        info!(
            request_id = request_id,
            request_type = ?request.kind,
            intent = request.intent_name.as_deref().unwrap_or("none"),
            slot_count = request.slots.len(),
            "Skill request received"
        );
    }

    /// Log outgoing response
    #[instrument(skip(self, response), fields(session_id = %response.session_id))]
    pub fn log_response(&self, response: &ResponseEnvelope) {
        if !self.log_requests {
            return;
        }

        match &response.response {
            Some(body) => info!(
                request_id = %response.request_id,
                speech = %truncate_text(&body.output_speech.ssml, 80),
                should_end_session = body.should_end_session,
                "Skill response sent"
            ),
            None if response.is_error() => {}
            None => debug!(request_id = %response.request_id, "Lifecycle request acknowledged"),
        }
    }

    /// Log a failed request once, at the level its severity calls for
    #[instrument(skip(self, error))]
    pub fn log_error(&self, error: &FailChatError, context: &str, session_id: Option<&str>) {
        if !self.log_errors {
            return;
        }

        match error.severity() {
            ErrorSeverity::Info => info!(
                error = %error,
                code = error.code(),
                context = context,
                session_id = session_id,
                "Request rejected"
            ),
            ErrorSeverity::Warning => warn!(
                error = %error,
                code = error.code(),
                context = context,
                session_id = session_id,
                "Request rejected"
            ),
            ErrorSeverity::Error | ErrorSeverity::Critical => error!(
                error = %error,
                code = error.code(),
                severity = %error.severity(),
                recoverable = error.is_recoverable(),
                context = context,
                session_id = session_id,
                "Error occurred"
            ),
        }
    }

    /// Create a performance tracking span
    pub fn create_performance_span(&self, operation: &str) -> Option<PerformanceTracker> {
        if self.log_performance {
            Some(PerformanceTracker::new(operation.to_string()))
        } else {
            None
        }
    }
}

impl From<&LoggingConfig> for LoggingMiddleware {
    fn from(config: &LoggingConfig) -> Self {
        Self::new(config.log_requests, config.log_performance, config.log_errors)
    }
}

/// Performance tracker for measuring operation duration
pub struct PerformanceTracker {
    operation: String,
    start_time: Instant,
    _span: Span,
}

impl PerformanceTracker {
    fn new(operation: String) -> Self {
        let span = tracing::info_span!("performance", operation = %operation);

        Self {
            operation,
            start_time: Instant::now(),
            _span: span,
        }
    }

    /// Complete the performance tracking and log the result
    pub fn complete(self, success: bool) {
        let duration_ms = self.start_time.elapsed().as_millis();

        if success {
            debug!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation completed successfully"
            );
        } else {
            warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Operation failed"
            );
        }

        if duration_ms > 1000 {
            warn!(
                operation = %self.operation,
                duration_ms = duration_ms,
                "Slow operation detected"
            );
        }
    }
}
