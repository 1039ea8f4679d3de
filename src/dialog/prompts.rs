//! Fixed dialog wording
//!
//! Several strings are kept exactly as the skill has always spoken them,
//! including the missing space after "call"/"calling" and the help lines
//! inherited from the knock-knock sample.

pub const ARE_YOU_OK: &str = "Are you ok?";
pub const ARE_YOU_OK_REPROMPT: &str = "I didn't hear a response, are you ok?";

pub const CONFUSED_LEAD: &str = "I was asking if you are ok!";
pub const CONFUSED_PAUSE_MS: u32 = 300;
pub const CONFUSED_TAIL: &str = "ok, ok?";
pub const CONFUSED_REPROMPT: &str = "You can ask for help again";

pub const NOT_HEARD: &str = "Sorry, I couldn't hear you well. You can ask for help again.";
pub const NOT_HEARD_REPROMPT: &str = "You can ask for help again.";

pub const ALWAYS_HERE: &str = "I am always here if you need me";
pub const VERIFY_CONDITION: &str = "Not sure you are ok, would like to verify. Are you ok?";
pub const NOT_RETRIEVED: &str =
    "Sorry, I couldn't correctly retrieve what you said. You can ask for help if needed";
pub const NOT_RETRIEVED_REPROMPT: &str = "You can ask for help if needed";

pub const CALL_OFFER_REPROMPT: &str = "Did you say no?";

pub const HELP_GENERIC: &str = "Knock knock jokes are a fun call and response type of joke. \
    To start the joke, just ask by saying tell me a joke, or you can say exit.";
pub const HELP_AWAITING_CONDITION: &str = "You can ask, who's there, or you can say exit.";
pub const HELP_CONDITION_GOOD: &str = "You can ask, who, or you can say exit.";

pub const UNKNOWN_INTENT_FALLBACK: &str = "Sorry, I didn't understand that. You can ask for help.";

pub fn good_condition_reprompt(answer: &str) -> String {
    format!("You can ask, {} who?", answer)
}

pub fn call_offer(contact: &str) -> String {
    format!("Shall I call{}", contact)
}

pub fn calling(contact: &str) -> String {
    format!("Ok, calling{}", contact)
}

/// Diagnostic reprompt listing the slot names that came with the confirmation
pub fn slot_summary<'a>(slot_names: impl IntoIterator<Item = &'a str>) -> String {
    let mut summary = String::new();
    let mut count = 0;
    for name in slot_names {
        summary.push_str(name);
        count += 1;
    }
    summary.push_str(&format!("we had{}slots", count));
    summary
}
