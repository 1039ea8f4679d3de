//! Skill request handler
//!
//! Threads session state from the store through the dialog engine and back,
//! and applies the host's policy for intents the dialog does not know.

use std::sync::{Arc, Mutex};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::{Settings, UnknownIntentPolicy};
use crate::dialog::{prompts::UNKNOWN_INTENT_FALLBACK, DialogEngine, DialogOptions, Event, Turn};
use crate::middleware::LoggingMiddleware;
use crate::response::ResponseBuilder;
use crate::state::{SessionState, SessionStore};
use crate::utils::errors::{DialogError, FailChatError, Result};
use crate::utils::helpers::generate_uuid;
use crate::utils::logging::log_transition;
use super::envelope::{RequestEnvelope, ResponseEnvelope};

/// Entry point for every request the host delivers
pub struct SkillHandler {
    engine: DialogEngine,
    store: Arc<dyn SessionStore>,
    unknown_intent: UnknownIntentPolicy,
    rng: Mutex<StdRng>,
    logging: LoggingMiddleware,
}

impl SkillHandler {
    pub fn new(settings: &Settings, store: Arc<dyn SessionStore>) -> Self {
        Self::with_rng(settings, store, StdRng::from_entropy())
    }

    /// Handler with a fixed random source, for reproducible conversations
    pub fn with_seed(settings: &Settings, store: Arc<dyn SessionStore>, seed: u64) -> Self {
        Self::with_rng(settings, store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(settings: &Settings, store: Arc<dyn SessionStore>, rng: StdRng) -> Self {
        Self {
            engine: DialogEngine::new(DialogOptions::from(&settings.dialog)),
            store,
            unknown_intent: settings.dialog.unknown_intent,
            rng: Mutex::new(rng),
            logging: LoggingMiddleware::from(&settings.logging),
        }
    }

    pub fn engine(&self) -> &DialogEngine {
        &self.engine
    }

    /// Handle one raw JSON request line
    ///
    /// Always yields exactly one envelope. Requests that cannot be parsed or
    /// that fail come back with `response: null` and an `error` body, echoing
    /// whatever `sessionId` and `requestId` could be read from the line.
    pub async fn handle_line(&self, line: &str) -> ResponseEnvelope {
        let mut request = match RequestEnvelope::from_json(line) {
            Ok(request) => request,
            Err(e) => {
                let (session_id, request_id) = salvage_ids(line);
                self.logging.log_error(&e, "parse_request", Some(session_id.as_str()));
                return ResponseEnvelope::failure(session_id, request_id, &e);
            }
        };

        let request_id = request.request_id.get_or_insert_with(generate_uuid).clone();
        match self.handle(&request).await {
            Ok(response) => response,
            Err(e) => ResponseEnvelope::failure(request.session_id.as_str(), request_id, &e),
        }
    }

    /// Handle one request: load state, run the turn, persist, render
    pub async fn handle(&self, request: &RequestEnvelope) -> Result<ResponseEnvelope> {
        let request_id = request.request_id.clone().unwrap_or_else(generate_uuid);
        let session_id = request.session_id.as_str();
        self.logging.log_request(request, &request_id);
        let tracker = self.logging.create_performance_span("skill_turn");

        let result = self.run_turn(session_id, request).await;
        if let Some(tracker) = tracker {
            tracker.complete(result.is_ok());
        }

        match result {
            Ok(turn) => {
                let envelope = ResponseEnvelope::new(session_id, request_id, turn.response.as_ref());
                self.logging.log_response(&envelope);
                Ok(envelope)
            }
            Err(e) => {
                self.logging.log_error(&e, "skill_turn", Some(session_id));
                Err(e)
            }
        }
    }

    async fn run_turn(&self, session_id: &str, request: &RequestEnvelope) -> Result<Turn> {
        let event = request.to_event()?;
        let state = self.store.load(session_id).await?.unwrap_or_default();

        let outcome = {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            self.engine.handle_event(&state, &event, &mut *rng)
        };

        let turn = match outcome {
            Ok(turn) => turn,
            Err(DialogError::UnknownIntent(name)) => self.unknown_intent(&state, name)?,
            Err(e) => return Err(e.into()),
        };

        log_transition(session_id, event.label(), state.stage, turn.state.stage);

        if matches!(event, Event::SessionEnded) || turn.ends_session() {
            self.store.delete(session_id).await?;
            info!(session_id = session_id, "Session closed");
        } else {
            self.store.save(session_id, &turn.state).await?;
        }

        Ok(turn)
    }

    fn unknown_intent(&self, state: &SessionState, name: String) -> Result<Turn> {
        match self.unknown_intent {
            UnknownIntentPolicy::Reject => Err(FailChatError::Dialog(DialogError::UnknownIntent(name))),
            UnknownIntentPolicy::Fallback => {
                warn!(intent = %name, "Unknown intent, answering with fallback");
                Ok(Turn {
                    state: state.clone(),
                    response: Some(ResponseBuilder::ask(UNKNOWN_INTENT_FALLBACK).build()),
                })
            }
        }
    }
}

/// Best-effort ids from a line that did not parse as a request
fn salvage_ids(line: &str) -> (String, String) {
    let value = serde_json::from_str::<Value>(line).unwrap_or(Value::Null);
    let field = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_string);

    (
        field("sessionId").unwrap_or_default(),
        field("requestId").unwrap_or_else(generate_uuid),
    )
}

impl std::fmt::Debug for SkillHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillHandler")
            .field("engine", &self.engine)
            .field("unknown_intent", &self.unknown_intent)
            .finish_non_exhaustive()
    }
}
