//! Wellbeing dialog state machine
//!
//! Given the current [`SessionState`] and an incoming [`Event`], the engine
//! works out the next state and what to say. Apart from the random pool
//! picks, which draw from the caller's random source, a turn is a pure
//! function of its inputs.

use rand::Rng;
use tracing::{debug, warn};

use crate::config::DialogConfig;
use crate::response::{ResponseBuilder, ResponseDescriptor, Speech};
use crate::state::{DialogStage, SessionState};
use crate::utils::errors::{DialogResult, FailChatError, Result};
use super::events::{Event, Intent, Slots};
use super::pools::{pick_index, ContactEntry, ReassuranceAnswer, CONTACTS, REASSURANCE_ANSWERS};
use super::prompts;

/// Outcome of one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub state: SessionState,
    /// `None` for lifecycle events that need no reply
    pub response: Option<ResponseDescriptor>,
}

impl Turn {
    fn respond(state: SessionState, response: ResponseDescriptor) -> Self {
        Self {
            state,
            response: Some(response),
        }
    }

    fn silent(state: SessionState) -> Self {
        Self { state, response: None }
    }

    /// Whether this turn closes the conversation
    pub fn ends_session(&self) -> bool {
        self.response.as_ref().map_or(false, ResponseDescriptor::is_terminal)
    }
}

/// Behaviour switches for the engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogOptions {
    /// Close the session after "Ok, calling ..."
    pub end_session_after_call: bool,
    pub card_title: String,
}

impl Default for DialogOptions {
    fn default() -> Self {
        DialogOptions::from(&DialogConfig::default())
    }
}

impl From<&DialogConfig> for DialogOptions {
    fn from(config: &DialogConfig) -> Self {
        Self {
            end_session_after_call: config.end_session_after_call,
            card_title: config.card_title.clone(),
        }
    }
}

/// The wellbeing check dialog
#[derive(Debug, Clone)]
pub struct DialogEngine {
    options: DialogOptions,
    answers: &'static [ReassuranceAnswer],
    contacts: &'static [ContactEntry],
}

impl DialogEngine {
    /// Create an engine over the built-in answer and contact pools
    pub fn new(options: DialogOptions) -> Self {
        Self {
            options,
            answers: &REASSURANCE_ANSWERS,
            contacts: &CONTACTS,
        }
    }

    /// Create an engine over custom pools; both must be non-empty
    pub fn with_pools(
        options: DialogOptions,
        answers: &'static [ReassuranceAnswer],
        contacts: &'static [ContactEntry],
    ) -> Result<Self> {
        if answers.is_empty() || contacts.is_empty() {
            return Err(FailChatError::Config(
                "Answer and contact pools must not be empty".to_string()
            ));
        }
        Ok(Self { options, answers, contacts })
    }

    pub fn contacts(&self) -> &[ContactEntry] {
        self.contacts
    }

    /// Handle one event for one session
    pub fn handle_event<R: Rng + ?Sized>(
        &self,
        state: &SessionState,
        event: &Event,
        rng: &mut R,
    ) -> DialogResult<Turn> {
        let turn = match event {
            Event::SessionStarted => Turn::silent(state.clone()),
            Event::SessionEnded => {
                let mut next = state.clone();
                next.reset();
                Turn::silent(next)
            }
            Event::Launch => self.ask_are_you_ok(state),
            Event::Intent { name, slots } => {
                let intent: Intent = name.parse()?;
                self.handle_intent(state, intent, slots, rng)
            }
        };

        debug!(
            event = event.label(),
            from = ?state.stage,
            to = ?turn.state.stage,
            ends_session = turn.ends_session(),
            "Dialog turn handled"
        );
        Ok(turn)
    }

    fn handle_intent<R: Rng + ?Sized>(
        &self,
        state: &SessionState,
        intent: Intent,
        slots: &Slots,
        rng: &mut R,
    ) -> Turn {
        match intent {
            Intent::CheckCondition => self.ask_are_you_ok(state),
            Intent::ConditionGood => self.condition_good(state, rng),
            Intent::ConfirmGoodCondition => self.confirm_good_condition(state),
            Intent::ConditionBad => self.condition_bad(state, rng),
            Intent::ConditionBadConfirm => self.confirm_call(state, slots),
            Intent::Help => self.help(state),
        }
    }

    fn ask_are_you_ok(&self, state: &SessionState) -> Turn {
        let mut next = state.clone();
        next.advance(DialogStage::AwaitingConditionResponse);

        let response = ResponseBuilder::ask(prompts::ARE_YOU_OK)
            .reprompt(prompts::ARE_YOU_OK_REPROMPT)
            .card(self.options.card_title.as_str(), prompts::ARE_YOU_OK)
            .build();
        Turn::respond(next, response)
    }

    fn condition_good<R: Rng + ?Sized>(&self, state: &SessionState, rng: &mut R) -> Turn {
        match state.stage {
            None => not_heard(state),
            Some(DialogStage::AwaitingConditionResponse) => {
                let answer = self.answers[pick_index(rng, self.answers.len())];

                let mut next = state.clone();
                next.advance(DialogStage::ConditionGoodAcknowledged);

                let response = ResponseBuilder::ask(answer.spoken_text)
                    .reprompt(prompts::good_condition_reprompt(answer.spoken_text))
                    .card(self.options.card_title.as_str(), answer.card_text)
                    .build();
                Turn::respond(next, response)
            }
            Some(_) => confused(state),
        }
    }

    fn confirm_good_condition(&self, state: &SessionState) -> Turn {
        let title = self.options.card_title.as_str();
        match state.stage {
            None => {
                let response = ResponseBuilder::ask(prompts::NOT_RETRIEVED)
                    .reprompt(prompts::NOT_RETRIEVED_REPROMPT)
                    .card(title, prompts::NOT_RETRIEVED)
                    .build();
                Turn::respond(state.clone(), response)
            }
            Some(DialogStage::ConditionGoodAcknowledged) => {
                let mut next = state.clone();
                next.advance(DialogStage::ConditionGoodClosed);

                let response = ResponseBuilder::tell(prompts::ALWAYS_HERE)
                    .card(title, prompts::ALWAYS_HERE)
                    .build();
                Turn::respond(next, response)
            }
            Some(_) => {
                let mut next = state.clone();
                next.advance(DialogStage::AwaitingConditionResponse);

                let response = ResponseBuilder::ask(prompts::VERIFY_CONDITION)
                    .reprompt(prompts::VERIFY_CONDITION)
                    .card(title, prompts::VERIFY_CONDITION)
                    .build();
                Turn::respond(next, response)
            }
        }
    }

    fn condition_bad<R: Rng + ?Sized>(&self, state: &SessionState, rng: &mut R) -> Turn {
        match state.stage {
            None => not_heard(state),
            Some(DialogStage::AwaitingConditionResponse) => {
                let index = pick_index(rng, self.contacts.len());
                let contact = self.contacts[index];

                let mut next = state.clone();
                next.advance(DialogStage::ConditionBadAwaitingCallConfirmation);
                next.selected_contact_index = Some(index);

                let response = ResponseBuilder::ask(prompts::call_offer(contact.label()))
                    .reprompt(prompts::CALL_OFFER_REPROMPT)
                    .build();
                Turn::respond(next, response)
            }
            Some(_) => confused(state),
        }
    }

    fn confirm_call(&self, state: &SessionState, slots: &Slots) -> Turn {
        match state.stage {
            None => not_heard(state),
            Some(DialogStage::ConditionBadAwaitingCallConfirmation) => {
                let contact = state
                    .selected_contact_index
                    .and_then(|index| self.contacts.get(index));

                let Some(contact) = contact else {
                    warn!(
                        selected_contact_index = ?state.selected_contact_index,
                        "No usable contact stored for call confirmation, asking again"
                    );
                    return confused(state);
                };

                let mut next = state.clone();
                next.advance(DialogStage::ConditionBadCallConfirmed);

                let response = ResponseBuilder::ask(prompts::calling(contact.label()))
                    .reprompt(prompts::slot_summary(slots.keys().map(String::as_str)))
                    .keep_open(!self.options.end_session_after_call)
                    .build();
                Turn::respond(next, response)
            }
            Some(_) => confused(state),
        }
    }

    fn help(&self, state: &SessionState) -> Turn {
        let text = match state.stage {
            Some(DialogStage::AwaitingConditionResponse) => prompts::HELP_AWAITING_CONDITION,
            Some(DialogStage::ConditionGoodAcknowledged) => prompts::HELP_CONDITION_GOOD,
            _ => prompts::HELP_GENERIC,
        };
        Turn::respond(state.clone(), ResponseBuilder::ask(text).build())
    }
}

impl Default for DialogEngine {
    fn default() -> Self {
        Self::new(DialogOptions::default())
    }
}

/// The user answered something that does not fit where we are; ask again
fn confused(state: &SessionState) -> Turn {
    let mut next = state.clone();
    next.advance(DialogStage::AwaitingConditionResponse);

    let speech = Speech::text(prompts::CONFUSED_LEAD)
        .then_pause(prompts::CONFUSED_PAUSE_MS)
        .then_text(prompts::CONFUSED_TAIL);
    let response = ResponseBuilder::ask(speech)
        .reprompt(prompts::CONFUSED_REPROMPT)
        .build();
    Turn::respond(next, response)
}

/// No dialog in progress; state stays untouched
fn not_heard(state: &SessionState) -> Turn {
    let response = ResponseBuilder::ask(prompts::NOT_HEARD)
        .reprompt(prompts::NOT_HEARD_REPROMPT)
        .build();
    Turn::respond(state.clone(), response)
}
