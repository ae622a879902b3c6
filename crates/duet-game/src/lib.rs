//! Duet — board, turn engine, and state handoff bounded context.
//!
//! Responsible for dealing the two private role views, running the
//! clue/guess protocol, detecting win and loss, and encoding the whole game
//! into the blob that players hand to each other.

pub mod application;
pub mod domain;
