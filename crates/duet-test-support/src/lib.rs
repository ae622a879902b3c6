//! Shared test mocks and utilities for the Duet word-association engine.

mod channel;
mod rng;
mod words;

pub use channel::{FailingChannel, RecordingChannel};
pub use rng::{IdentityRng, MockRng, SequenceRng};
pub use words::{StaticWordSource, sample_words};
