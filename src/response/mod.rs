//! Response building
//!
//! Turns dialog output into response descriptors and renders speech markup.

pub mod builder;
pub mod speech;

pub use builder::{build, Card, ResponseBuilder, ResponseDescriptor};
pub use speech::{Speech, SpeechPart};
