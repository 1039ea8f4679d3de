//! Wellbeing dialog
//!
//! This module holds the dialog state machine: the events it reacts to, the
//! answer pools it draws from and the fixed wording it speaks.

pub mod engine;
pub mod events;
pub mod pools;
pub mod prompts;

pub use engine::{DialogEngine, DialogOptions, Turn};
pub use events::{Event, Intent, Slots};
pub use pools::{ContactEntry, ReassuranceAnswer, CONTACTS, REASSURANCE_ANSWERS};
