//! Spoken output
//!
//! Speech is kept as plain text runs separated by pauses. Markup is only
//! produced when the host asks for it.

use std::fmt;

use serde::Serialize;

use crate::utils::helpers::{escape_ssml, format_pause};

/// One piece of spoken output
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeechPart {
    Text(String),
    /// Silence, in milliseconds
    Pause(u32),
}

/// Text to be spoken, possibly with pauses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Speech {
    parts: Vec<SpeechPart>,
}

impl Speech {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            parts: vec![SpeechPart::Text(text.into())],
        }
    }

    pub fn then_pause(mut self, millis: u32) -> Self {
        self.parts.push(SpeechPart::Pause(millis));
        self
    }

    pub fn then_text(mut self, text: impl Into<String>) -> Self {
        self.parts.push(SpeechPart::Text(text.into()));
        self
    }

    /// Text without markup; a pause reads as a single space
    pub fn plain(&self) -> String {
        self.parts
            .iter()
            .map(|part| match part {
                SpeechPart::Text(text) => text.as_str(),
                SpeechPart::Pause(_) => " ",
            })
            .collect()
    }

    /// SSML document for the voice platform
    pub fn to_ssml(&self) -> String {
        let mut ssml = String::from("<speak>");
        for part in &self.parts {
            match part {
                SpeechPart::Text(text) => ssml.push_str(&escape_ssml(text)),
                SpeechPart::Pause(millis) => {
                    ssml.push_str(&format!(" <break time=\"{}\" /> ", format_pause(*millis)));
                }
            }
        }
        ssml.push_str("</speak>");
        ssml
    }
}

impl fmt::Display for Speech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.plain())
    }
}

impl From<&str> for Speech {
    fn from(text: &str) -> Self {
        Speech::text(text)
    }
}

impl From<String> for Speech {
    fn from(text: String) -> Self {
        Speech::text(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        let speech = Speech::text("Are you ok?");
        assert_eq!(speech.plain(), "Are you ok?");
        assert_eq!(speech.to_ssml(), "<speak>Are you ok?</speak>");
    }

    #[test]
    fn test_pause_rendering() {
        let speech = Speech::text("I was asking if you are ok!").then_pause(300).then_text("ok, ok?");
        assert_eq!(speech.plain(), "I was asking if you are ok! ok, ok?");
        assert_eq!(
            speech.to_ssml(),
            "<speak>I was asking if you are ok! <break time=\"0.3s\" /> ok, ok?</speak>"
        );
    }

    #[test]
    fn test_markup_is_escaped() {
        assert_eq!(Speech::text("a < b & c").to_ssml(), "<speak>a &lt; b &amp; c</speak>");
    }
}
