//! Helper functions and utilities
//!
//! This module contains common helper functions used throughout the application.

use uuid::Uuid;

/// Generate a new UUID v4
pub fn generate_uuid() -> String {
    Uuid::new_v4().to_string()
}

/// Truncate text to a maximum length with ellipsis
pub fn truncate_text(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        text.to_string()
    } else {
        let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

/// Escape characters that would break SSML markup
pub fn escape_ssml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Format a pause length as an SSML time value, e.g. 300 -> "0.3s"
pub fn format_pause(millis: u32) -> String {
    if millis % 1000 == 0 {
        return format!("{}s", millis / 1000);
    }
    let seconds = format!("{:.3}", millis as f64 / 1000.0);
    format!("{}s", seconds.trim_end_matches('0'))
}
