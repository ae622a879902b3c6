//! Domain layer: board, role assignment, game state, turn engine, wire codec.

pub mod board;
pub mod commands;
pub mod engine;
pub mod events;
pub mod roles;
pub mod state;
pub mod wire;
