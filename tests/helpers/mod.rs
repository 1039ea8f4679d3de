//! Test helpers module
//!
//! Shared setup for the FailChat integration tests: seeded random sources,
//! a session store, and a small driver that plays a conversation through the
//! skill handler.

#![allow(dead_code)]

use std::sync::Arc;

use rand::rngs::mock::StepRng;
use rand::rngs::StdRng;
use rand::SeedableRng;

use FailChat::{
    config::{Settings, UnknownIntentPolicy},
    handlers::{RequestEnvelope, RequestType, ResponseEnvelope, SkillHandler},
    state::InMemorySessionStore,
    Result,
};

pub const TEST_SEED: u64 = 0x5eed_fa11;

/// Random source whose every pick is index 0
pub fn first_pick() -> StepRng {
    StepRng::new(0, 0)
}

pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(TEST_SEED)
}

/// Settings for tests, with knobs for the two configurable behaviours
pub fn test_settings(end_session_after_call: bool, unknown_intent: UnknownIntentPolicy) -> Settings {
    let mut settings = Settings::default();
    settings.dialog.end_session_after_call = end_session_after_call;
    settings.dialog.unknown_intent = unknown_intent;
    settings
}

/// A skill handler wired to an in-memory store the test can inspect
pub struct TestHost {
    pub store: InMemorySessionStore,
    pub handler: SkillHandler,
    pub session_id: String,
}

impl TestHost {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        let _ = tracing_subscriber::fmt().with_test_writer().try_init();

        let store = InMemorySessionStore::new(&settings.session);
        let handler = SkillHandler::with_seed(&settings, Arc::new(store.clone()), TEST_SEED);

        Self {
            store,
            handler,
            session_id: "test-session".to_string(),
        }
    }

    pub async fn send(&self, request: RequestEnvelope) -> Result<ResponseEnvelope> {
        self.handler.handle(&request).await
    }

    pub async fn launch(&self) -> Result<ResponseEnvelope> {
        self.send(RequestEnvelope::new(RequestType::Launch, self.session_id.as_str())).await
    }

    pub async fn intent(&self, name: &str) -> Result<ResponseEnvelope> {
        self.send(RequestEnvelope::intent(self.session_id.as_str(), name)).await
    }

    /// Feed one raw JSON line, as the stdin host does
    pub async fn line(&self, line: &str) -> ResponseEnvelope {
        self.handler.handle_line(line).await
    }

    pub async fn end(&self) -> Result<ResponseEnvelope> {
        self.send(RequestEnvelope::new(RequestType::SessionEnded, self.session_id.as_str())).await
    }
}

/// SSML of the spoken part of a response
pub fn ssml(response: &ResponseEnvelope) -> &str {
    &response
        .response
        .as_ref()
        .expect("response body")
        .output_speech
        .ssml
}

/// Strip the outer `<speak>` wrapper
pub fn spoken(response: &ResponseEnvelope) -> &str {
    ssml(response)
        .trim_start_matches("<speak>")
        .trim_end_matches("</speak>")
}

pub fn ends_session(response: &ResponseEnvelope) -> bool {
    response.response.as_ref().expect("response body").should_end_session
}
