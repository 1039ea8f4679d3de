//! Skill handlers module
//!
//! This module connects the voice platform host to the dialog:
//! - Envelopes for inbound requests and outbound responses
//! - The skill handler that runs one dialog turn per request

pub mod envelope;
pub mod skill;

pub use envelope::{ErrorBody, RequestEnvelope, RequestType, ResponseBody, ResponseEnvelope};
pub use skill::SkillHandler;
