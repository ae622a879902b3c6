//! Duet Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types the game context
//! depends on: errors, randomness, commands, events, and the transport seams
//! the engine reads state from and hands state off to. It contains no game
//! rules.

pub mod channel;
pub mod command;
pub mod error;
pub mod event;
pub mod rng;
