//! FailChat voice skill
//!
//! A short voice conversation that checks on a user's wellbeing after a fall.
//! If the user is fine the skill reassures them and closes; if not it offers
//! to call one of their contacts. This library provides the dialog state
//! machine, response building, and a thin host layer around them.

#![allow(non_snake_case)]

pub mod config;
pub mod dialog;
pub mod handlers;
pub mod middleware;
pub mod response;
pub mod state;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{DialogError, FailChatError, Result};

// Re-export main components for easy access
pub use dialog::{DialogEngine, DialogOptions, Event, Intent, Turn};
pub use handlers::{RequestEnvelope, ResponseEnvelope, SkillHandler};
pub use response::{ResponseBuilder, ResponseDescriptor, Speech};
pub use state::{DialogStage, InMemorySessionStore, SessionState, SessionStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
