//! Session state for the wellbeing dialog
//!
//! The host owns the session attributes; this module maps the handful of keys
//! the dialog cares about onto a typed [`SessionState`] and back.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::utils::errors::{DialogError, FailChatError, Result};

/// Attribute key holding the dialog stage code
pub const SESSION_STAGE: &str = "stage";
/// Attribute key holding the index of the contact we offered to call
pub const SESSION_CALL_TO_ID: &str = "calltoid";
/// Legacy attribute key, carried through untouched
pub const SESSION_ANSWER_ID: &str = "jokeid";

/// Host-side session attributes
pub type SessionAttributes = HashMap<String, Value>;

/// Discrete position in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "i64")]
pub enum DialogStage {
    Initial,
    /// "Are you ok?" has been asked
    AwaitingConditionResponse,
    ConditionGoodAcknowledged,
    ConditionGoodClosed,
    /// "Shall I call ..." has been asked
    ConditionBadAwaitingCallConfirmation,
    ConditionBadCallConfirmed,
}

impl DialogStage {
    pub const ALL: [DialogStage; 6] = [
        DialogStage::Initial,
        DialogStage::AwaitingConditionResponse,
        DialogStage::ConditionGoodAcknowledged,
        DialogStage::ConditionGoodClosed,
        DialogStage::ConditionBadAwaitingCallConfirmation,
        DialogStage::ConditionBadCallConfirmed,
    ];

    /// Numeric code stored in the session attributes
    pub fn code(self) -> u8 {
        match self {
            DialogStage::Initial => 0,
            DialogStage::AwaitingConditionResponse => 1,
            DialogStage::ConditionGoodAcknowledged => 2,
            DialogStage::ConditionGoodClosed => 3,
            DialogStage::ConditionBadAwaitingCallConfirmation => 4,
            DialogStage::ConditionBadCallConfirmed => 5,
        }
    }

    pub fn from_code(code: i64) -> std::result::Result<Self, DialogError> {
        match code {
            0 => Ok(DialogStage::Initial),
            1 => Ok(DialogStage::AwaitingConditionResponse),
            2 => Ok(DialogStage::ConditionGoodAcknowledged),
            3 => Ok(DialogStage::ConditionGoodClosed),
            4 => Ok(DialogStage::ConditionBadAwaitingCallConfirmation),
            5 => Ok(DialogStage::ConditionBadCallConfirmed),
            other => Err(DialogError::InvalidStage(other)),
        }
    }

    /// Stages in which a selected contact is meaningful
    pub fn holds_contact(self) -> bool {
        matches!(
            self,
            DialogStage::ConditionBadAwaitingCallConfirmation | DialogStage::ConditionBadCallConfirmed
        )
    }
}

impl From<DialogStage> for u8 {
    fn from(stage: DialogStage) -> Self {
        stage.code()
    }
}

impl TryFrom<i64> for DialogStage {
    type Error = DialogError;

    fn try_from(code: i64) -> std::result::Result<Self, Self::Error> {
        DialogStage::from_code(code)
    }
}

impl fmt::Display for DialogStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DialogStage::Initial => "initial",
            DialogStage::AwaitingConditionResponse => "awaiting_condition_response",
            DialogStage::ConditionGoodAcknowledged => "condition_good_acknowledged",
            DialogStage::ConditionGoodClosed => "condition_good_closed",
            DialogStage::ConditionBadAwaitingCallConfirmation => "condition_bad_awaiting_call_confirmation",
            DialogStage::ConditionBadCallConfirmed => "condition_bad_call_confirmed",
        };
        f.write_str(name)
    }
}

/// Per-conversation dialog progress
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// Absent until the first "are you ok" has been asked
    #[serde(rename = "stage", default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<DialogStage>,
    #[serde(rename = "calltoid", default, skip_serializing_if = "Option::is_none")]
    pub selected_contact_index: Option<usize>,
    #[serde(rename = "jokeid", default, skip_serializing_if = "Option::is_none")]
    pub selected_answer_index: Option<usize>,
}

impl SessionState {
    /// State of a conversation that has not started yet
    pub fn new() -> Self {
        Self::default()
    }

    pub fn at(stage: DialogStage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }

    pub fn is_started(&self) -> bool {
        self.stage.is_some()
    }

    /// Move to `stage`, dropping the contact selection when it no longer applies
    pub fn advance(&mut self, stage: DialogStage) {
        self.stage = Some(stage);
        if !stage.holds_contact() {
            self.selected_contact_index = None;
        }
    }

    /// Forget all dialog progress
    pub fn reset(&mut self) {
        self.stage = None;
        self.selected_contact_index = None;
        self.selected_answer_index = None;
    }

    /// Read the dialog keys out of the host's session attributes
    pub fn from_attributes(attributes: &SessionAttributes) -> Result<Self> {
        let mut state = SessionState::new();

        if let Some(value) = attributes.get(SESSION_STAGE) {
            let code = value.as_i64().ok_or_else(|| {
                FailChatError::InvalidRequest(format!("Session stage is not an integer: {}", value))
            })?;
            state.stage = Some(DialogStage::from_code(code)?);
        }
        state.selected_contact_index = read_index(attributes, SESSION_CALL_TO_ID)?;
        state.selected_answer_index = read_index(attributes, SESSION_ANSWER_ID)?;

        Ok(state)
    }

    /// Write the dialog keys into the host's session attributes, leaving other keys alone
    pub fn write_attributes(&self, attributes: &mut SessionAttributes) {
        write_value(attributes, SESSION_STAGE, self.stage.map(|s| Value::from(s.code())));
        write_value(attributes, SESSION_CALL_TO_ID, self.selected_contact_index.map(Value::from));
        write_value(attributes, SESSION_ANSWER_ID, self.selected_answer_index.map(Value::from));
    }

    pub fn to_attributes(&self) -> SessionAttributes {
        let mut attributes = SessionAttributes::new();
        self.write_attributes(&mut attributes);
        attributes
    }
}

fn read_index(attributes: &SessionAttributes, key: &str) -> Result<Option<usize>> {
    match attributes.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_u64()
            .map(|v| Some(v as usize))
            .ok_or_else(|| FailChatError::InvalidRequest(format!("Session attribute '{}' is not an index: {}", key, value))),
    }
}

fn write_value(attributes: &mut SessionAttributes, key: &str, value: Option<Value>) {
    match value {
        Some(value) => {
            attributes.insert(key.to_string(), value);
        }
        None => {
            attributes.remove(key);
        }
    }
}
