//! Answer pools the dialog picks from at random

use rand::Rng;
use serde::Serialize;

/// What we say when the user reports feeling fine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReassuranceAnswer {
    pub spoken_text: &'static str,
    pub card_text: &'static str,
}

/// Someone we can offer to call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ContactEntry(pub &'static str);

impl ContactEntry {
    pub fn label(&self) -> &'static str {
        self.0
    }
}

// Card text mirrors the speech for now; the first card keeps its original spelling.
pub static REASSURANCE_ANSWERS: [ReassuranceAnswer; 4] = [
    ReassuranceAnswer { spoken_text: "Glad to hear that", card_text: "Glad to thear that" },
    ReassuranceAnswer { spoken_text: "That's great!", card_text: "That's great!" },
    ReassuranceAnswer { spoken_text: "Wonderfull! I am so happy", card_text: "Wonderfull! I am so happy" },
    ReassuranceAnswer { spoken_text: "Great", card_text: "Great" },
];

pub static CONTACTS: [ContactEntry; 4] = [
    ContactEntry("Dave"),
    ContactEntry("your Care giver"),
    ContactEntry("Dor"),
    ContactEntry("Your son"),
];

/// Uniformly pick an index into a pool of `len` entries
///
/// `len` must be non-zero; pools are checked when the engine is built.
pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}
