//! Request and response envelopes exchanged with the voice platform host

use serde::{Deserialize, Serialize};

use crate::dialog::{Event, Slots};
use crate::response::ResponseDescriptor;
use crate::utils::errors::{FailChatError, Result};

/// Kind of inbound request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestType {
    SessionStarted,
    Launch,
    Intent,
    SessionEnded,
}

/// One inbound request from the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(rename = "type")]
    pub kind: RequestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent_name: Option<String>,
    #[serde(default, skip_serializing_if = "Slots::is_empty")]
    pub slots: Slots,
    pub session_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl RequestEnvelope {
    pub fn new(kind: RequestType, session_id: impl Into<String>) -> Self {
        Self {
            kind,
            intent_name: None,
            slots: Slots::new(),
            session_id: session_id.into(),
            request_id: None,
        }
    }

    pub fn intent(session_id: impl Into<String>, intent_name: impl Into<String>) -> Self {
        Self {
            intent_name: Some(intent_name.into()),
            ..Self::new(RequestType::Intent, session_id)
        }
    }

    pub fn with_slot(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.slots.insert(name.into(), value.into());
        self
    }

    /// Parse one JSON request
    pub fn from_json(line: &str) -> Result<Self> {
        let request: RequestEnvelope = serde_json::from_str(line)?;
        if request.session_id.trim().is_empty() {
            return Err(FailChatError::InvalidRequest("sessionId must not be empty".to_string()));
        }
        Ok(request)
    }

    /// The dialog event this request carries
    pub fn to_event(&self) -> Result<Event> {
        match self.kind {
            RequestType::SessionStarted => Ok(Event::SessionStarted),
            RequestType::Launch => Ok(Event::Launch),
            RequestType::SessionEnded => Ok(Event::SessionEnded),
            RequestType::Intent => {
                let name = self
                    .intent_name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                    .ok_or_else(|| FailChatError::InvalidRequest("Intent request without intentName".to_string()))?;
                Ok(Event::intent_with_slots(name, self.slots.clone()))
            }
        }
    }
}

/// Speech in the platform's markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub kind: String,
    pub ssml: String,
}

impl OutputSpeech {
    pub fn ssml(ssml: String) -> Self {
        Self {
            kind: "SSML".to_string(),
            ssml,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleCard {
    #[serde(rename = "type")]
    pub kind: String,
    pub title: String,
    pub content: String,
}

/// Rendered response for the platform
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    pub output_speech: OutputSpeech,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub card: Option<SimpleCard>,
    pub should_end_session: bool,
}

impl From<&ResponseDescriptor> for ResponseBody {
    fn from(descriptor: &ResponseDescriptor) -> Self {
        Self {
            output_speech: OutputSpeech::ssml(descriptor.speech.to_ssml()),
            reprompt: descriptor.reprompt.as_ref().map(|speech| Reprompt {
                output_speech: OutputSpeech::ssml(speech.to_ssml()),
            }),
            card: descriptor.card.as_ref().map(|card| SimpleCard {
                kind: "Simple".to_string(),
                title: card.title.clone(),
                content: card.body.clone(),
            }),
            should_end_session: !descriptor.keep_session_open,
        }
    }
}

/// Why a request produced no dialog response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl From<&FailChatError> for ErrorBody {
    fn from(error: &FailChatError) -> Self {
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
        }
    }
}

/// One outbound reply to the host
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session_id: String,
    pub request_id: String,
    /// `None` for lifecycle requests that need no reply, and for failures
    pub response: Option<ResponseBody>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorBody>,
}

impl ResponseEnvelope {
    pub fn new(session_id: impl Into<String>, request_id: impl Into<String>, descriptor: Option<&ResponseDescriptor>) -> Self {
        Self {
            version: "1.0".to_string(),
            session_id: session_id.into(),
            request_id: request_id.into(),
            response: descriptor.map(ResponseBody::from),
            error: None,
        }
    }

    /// Reply for a request that failed; `response` stays null
    pub fn failure(session_id: impl Into<String>, request_id: impl Into<String>, error: &FailChatError) -> Self {
        Self {
            error: Some(ErrorBody::from(error)),
            ..Self::new(session_id, request_id, None)
        }
    }

    pub fn is_error(&self) -> bool {
        self.error.is_some()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
