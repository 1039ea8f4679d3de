//! Events delivered to the dialog engine

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::utils::errors::DialogError;

/// Slot values attached to an intent, keyed by slot name
pub type Slots = BTreeMap<String, String>;

/// Something that happened in the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    SessionStarted,
    Launch,
    Intent { name: String, slots: Slots },
    SessionEnded,
}

impl Event {
    pub fn intent(name: impl Into<String>) -> Self {
        Event::Intent {
            name: name.into(),
            slots: Slots::new(),
        }
    }

    pub fn intent_with_slots(name: impl Into<String>, slots: Slots) -> Self {
        Event::Intent {
            name: name.into(),
            slots,
        }
    }

    /// Short label for logs
    pub fn label(&self) -> &str {
        match self {
            Event::SessionStarted => "SessionStarted",
            Event::Launch => "Launch",
            Event::Intent { name, .. } => name,
            Event::SessionEnded => "SessionEnded",
        }
    }
}

/// Intents the wellbeing dialog understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intent {
    CheckCondition,
    ConditionGood,
    ConfirmGoodCondition,
    ConditionBad,
    ConditionBadConfirm,
    Help,
}

impl Intent {
    pub const ALL: [Intent; 6] = [
        Intent::CheckCondition,
        Intent::ConditionGood,
        Intent::ConfirmGoodCondition,
        Intent::ConditionBad,
        Intent::ConditionBadConfirm,
        Intent::Help,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Intent::CheckCondition => "CheckCondition",
            Intent::ConditionGood => "ConditionGood",
            Intent::ConfirmGoodCondition => "ConfirmGoodCondition",
            Intent::ConditionBad => "ConditionBad",
            Intent::ConditionBadConfirm => "ConditionBadConfirm",
            Intent::Help => "Help",
        }
    }

    /// Name used by the voice interaction model
    pub fn model_name(self) -> &'static str {
        match self {
            Intent::CheckCondition => "CheckConditionIntent",
            Intent::ConditionGood => "ConditionGoodIntent",
            Intent::ConfirmGoodCondition => "ConfirmGoodConditionIntent",
            Intent::ConditionBad => "ConditionBadIntent",
            Intent::ConditionBadConfirm => "ConditionBadConfirmationIntent",
            Intent::Help => "HelpIntent",
        }
    }

    /// Exact-match lookup by short or interaction model name
    pub fn from_name(name: &str) -> Option<Intent> {
        Intent::ALL
            .into_iter()
            .find(|intent| intent.as_str() == name || intent.model_name() == name)
    }
}

impl FromStr for Intent {
    type Err = DialogError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        Intent::from_name(name).ok_or_else(|| DialogError::UnknownIntent(name.to_string()))
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_both_names_resolve() {
        for intent in Intent::ALL {
            assert_eq!(intent.as_str().parse::<Intent>().unwrap(), intent);
            assert_eq!(intent.model_name().parse::<Intent>().unwrap(), intent);
        }
    }

    #[test]
    fn test_matching_is_exact() {
        assert_matches!("help".parse::<Intent>(), Err(DialogError::UnknownIntent(name)) if name == "help");
        assert!(Intent::from_name("ConditionBadConfirmIntent").is_none());
        assert!(Intent::from_name("Help ").is_none());
        assert!(Intent::from_name("").is_none());
    }

    #[test]
    fn test_event_labels() {
        assert_eq!(Event::Launch.label(), "Launch");
        assert_eq!(Event::intent("HelpIntent").label(), "HelpIntent");
    }
}
