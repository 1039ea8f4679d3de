//! State management module
//!
//! This module handles per-session dialog state and the host-side store it lives in

pub mod session;
pub mod storage;

// Re-export commonly used state components
pub use session::{DialogStage, SessionAttributes, SessionState};
pub use storage::{InMemorySessionStore, SessionJanitor, SessionStore, StorageStats, StoredSession};
