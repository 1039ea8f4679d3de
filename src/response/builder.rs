//! Response descriptor assembly

use serde::Serialize;

use super::speech::Speech;

/// Visual companion to the spoken response
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Card {
    pub title: String,
    pub body: String,
}

/// Everything the host needs to answer one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResponseDescriptor {
    pub speech: Speech,
    pub reprompt: Option<Speech>,
    pub card: Option<Card>,
    /// `false` ends the conversation
    pub keep_session_open: bool,
}

impl ResponseDescriptor {
    pub fn is_terminal(&self) -> bool {
        !self.keep_session_open
    }
}

/// Assemble a response, enforcing the reprompt rules:
/// a closing response never reprompts, an open one without an explicit
/// reprompt repeats its speech.
pub fn build(speech: Speech, reprompt: Option<Speech>, card: Option<Card>, keep_open: bool) -> ResponseDescriptor {
    let reprompt = if keep_open {
        Some(reprompt.unwrap_or_else(|| speech.clone()))
    } else {
        None
    };

    ResponseDescriptor {
        speech,
        reprompt,
        card,
        keep_session_open: keep_open,
    }
}

/// Fluent front for [`build`]
#[derive(Debug, Clone)]
pub struct ResponseBuilder {
    speech: Speech,
    reprompt: Option<Speech>,
    card: Option<Card>,
    keep_open: bool,
}

impl ResponseBuilder {
    /// A response that keeps the session open and waits for the user
    pub fn ask(speech: impl Into<Speech>) -> Self {
        Self {
            speech: speech.into(),
            reprompt: None,
            card: None,
            keep_open: true,
        }
    }

    /// A response that ends the session
    pub fn tell(speech: impl Into<Speech>) -> Self {
        Self {
            keep_open: false,
            ..Self::ask(speech)
        }
    }

    pub fn reprompt(mut self, reprompt: impl Into<Speech>) -> Self {
        self.reprompt = Some(reprompt.into());
        self
    }

    pub fn card(mut self, title: impl Into<String>, body: impl Into<String>) -> Self {
        self.card = Some(Card {
            title: title.into(),
            body: body.into(),
        });
        self
    }

    pub fn keep_open(mut self, keep_open: bool) -> Self {
        self.keep_open = keep_open;
        self
    }

    pub fn build(self) -> ResponseDescriptor {
        build(self.speech, self.reprompt, self.card, self.keep_open)
    }
}
