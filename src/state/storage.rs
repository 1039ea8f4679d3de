//! Session state storage
//!
//! The dialog never persists anything itself; the host hands it a
//! [`SessionState`] and takes the updated one back. This module provides the
//! accessor seam the host talks to and an in-memory implementation with
//! per-session expiry and background cleanup.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::SessionConfig;
use crate::utils::errors::{FailChatError, Result};
use super::session::{SessionAttributes, SessionState};

/// Host-side access to per-conversation session state
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Load the state for a session; `None` when the session is unknown or expired
    async fn load(&self, session_id: &str) -> Result<Option<SessionState>>;

    /// Store the state for a session
    async fn save(&self, session_id: &str, state: &SessionState) -> Result<()>;

    /// Drop a session, returning whether anything was removed
    async fn delete(&self, session_id: &str) -> Result<bool>;
}

/// One stored conversation
#[derive(Debug, Clone, Serialize)]
pub struct StoredSession {
    pub attributes: SessionAttributes,
    pub expires_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredSession {
    pub fn is_expired(&self) -> bool {
        Utc::now() > self.expires_at
    }
}

/// Storage statistics
#[derive(Debug, Clone, Default, Serialize)]
pub struct StorageStats {
    pub total_sessions: usize,
    pub active_sessions: usize,
    pub expired_sessions: usize,
    pub stages_count: HashMap<String, u32>,
}

/// Process-local session store
#[derive(Debug, Clone)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<HashMap<String, StoredSession>>>,
    ttl: Duration,
}

impl InMemorySessionStore {
    /// Store with the configured session lifetime
    ///
    /// A lifetime too large for `chrono` saturates; `save` then reports the
    /// overflow as a configuration error.
    pub fn new(config: &SessionConfig) -> Self {
        let ttl = i64::try_from(config.ttl_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or(Duration::MAX);
        Self::with_ttl(ttl)
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Check if a live session exists
    pub async fn exists(&self, session_id: &str) -> bool {
        self.sessions
            .read()
            .await
            .get(session_id)
            .map_or(false, |s| !s.is_expired())
    }

    /// Raw attributes of a session, including keys the dialog does not own
    pub async fn attributes(&self, session_id: &str) -> Option<SessionAttributes> {
        self.sessions
            .read()
            .await
            .get(session_id)
            .filter(|s| !s.is_expired())
            .map(|s| s.attributes.clone())
    }

    /// Remove every expired session
    pub async fn purge_expired(&self) -> u32 {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| !s.is_expired());
        let purged = (before - sessions.len()) as u32;

        if purged > 0 {
            info!("Cleaned up {} expired sessions", purged);
        }
        purged
    }

    /// Get storage statistics
    pub async fn get_stats(&self) -> StorageStats {
        let sessions = self.sessions.read().await;
        let mut stats = StorageStats {
            total_sessions: sessions.len(),
            ..StorageStats::default()
        };

        for stored in sessions.values() {
            if stored.is_expired() {
                stats.expired_sessions += 1;
                continue;
            }
            let stage = match SessionState::from_attributes(&stored.attributes) {
                Ok(SessionState { stage: Some(stage), .. }) => stage.to_string(),
                Ok(_) => "not_started".to_string(),
                Err(_) => "unreadable".to_string(),
            };
            *stats.stages_count.entry(stage).or_insert(0) += 1;
        }
        stats.active_sessions = stats.total_sessions - stats.expired_sessions;

        stats
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, session_id: &str) -> Result<Option<SessionState>> {
        let stored = {
            let sessions = self.sessions.read().await;
            sessions.get(session_id).cloned()
        };

        let Some(stored) = stored else {
            debug!(session_id = session_id, "No session found");
            return Ok(None);
        };

        if stored.is_expired() {
            warn!(session_id = session_id, expires_at = %stored.expires_at, "Session has expired, removing");
            self.delete(session_id).await?;
            return Ok(None);
        }

        match SessionState::from_attributes(&stored.attributes) {
            Ok(state) => {
                debug!(session_id = session_id, stage = ?state.stage, "Session loaded");
                Ok(Some(state))
            }
            Err(e) => {
                error!(session_id = session_id, error = %e, "Unreadable session attributes, starting over");
                Ok(None)
            }
        }
    }

    async fn save(&self, session_id: &str, state: &SessionState) -> Result<()> {
        let now = Utc::now();
        let expires_at = now.checked_add_signed(self.ttl).ok_or_else(|| {
            FailChatError::Config(format!("Session TTL of {} overflows the expiry time", self.ttl))
        })?;
        let mut sessions = self.sessions.write().await;

        let stored = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| StoredSession {
                attributes: SessionAttributes::new(),
                expires_at,
                updated_at: now,
            });
        state.write_attributes(&mut stored.attributes);
        stored.expires_at = expires_at;
        stored.updated_at = now;

        debug!(session_id = session_id, stage = ?state.stage, "Session saved");
        Ok(())
    }

    async fn delete(&self, session_id: &str) -> Result<bool> {
        let removed = self.sessions.write().await.remove(session_id).is_some();

        if removed {
            debug!("Deleted session {}", session_id);
        } else {
            debug!("No session to delete for {}", session_id);
        }
        Ok(removed)
    }
}

/// Periodically purges expired sessions from an [`InMemorySessionStore`]
#[derive(Debug)]
pub struct SessionJanitor {
    store: InMemorySessionStore,
    cleanup_interval: StdDuration,
    cleanup_handle: Option<tokio::task::JoinHandle<()>>,
}

impl SessionJanitor {
    pub fn new(store: InMemorySessionStore, cleanup_interval: StdDuration) -> Self {
        Self {
            store,
            cleanup_interval,
            cleanup_handle: None,
        }
    }

    /// Start automatic cleanup task
    pub fn start_cleanup(&mut self) {
        if self.cleanup_handle.is_some() {
            warn!("Cleanup task is already running");
            return;
        }

        let store = self.store.clone();
        let interval = self.cleanup_interval;

        let handle = tokio::spawn(async move {
            let mut cleanup_interval = tokio::time::interval(interval);

            loop {
                cleanup_interval.tick().await;
                let count = store.purge_expired().await;
                if count > 0 {
                    debug!("Cleanup task removed {} expired sessions", count);
                }
            }
        });

        self.cleanup_handle = Some(handle);
        info!("Started automatic cleanup task with interval {:?}", self.cleanup_interval);
    }

    /// Stop automatic cleanup task
    pub fn stop_cleanup(&mut self) {
        if let Some(handle) = self.cleanup_handle.take() {
            handle.abort();
            info!("Stopped automatic cleanup task");
        }
    }

    pub fn is_running(&self) -> bool {
        self.cleanup_handle.is_some()
    }
}

impl Drop for SessionJanitor {
    fn drop(&mut self) {
        self.stop_cleanup();
    }
}
