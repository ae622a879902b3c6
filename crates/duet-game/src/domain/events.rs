//! Domain events for the Duet context.

use duet_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::board::Player;

/// Emitted when a clue opens a guess phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueSubmitted {
    /// The clue word, trimmed.
    pub text: String,
    /// The announced count.
    pub count: u32,
    /// Guess budget granted (`count + 1`).
    pub guesses: u32,
}

/// Emitted when a guess finds an agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentRevealed {
    /// Board position.
    pub index: usize,
    /// The board word that was found.
    pub word: String,
    /// Guess budget left afterwards.
    pub guesses_left: u32,
}

/// Emitted when a guess lands on a bystander.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BystanderGuessed {
    /// Board position.
    pub index: usize,
    /// The board word.
    pub word: String,
    /// Whose marker was added to the card.
    pub player: Player,
}

/// Emitted when a guess lands on an assassin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssassinGuessed {
    /// Board position.
    pub index: usize,
    /// The board word.
    pub word: String,
}

/// Emitted when the guesser declines the remaining budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessingStopped {
    /// Guesses that were left unused.
    pub forfeited: u32,
}

/// Emitted when a round ends and the baton passes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnEnded {
    /// The turn that starts next.
    pub next_turn: u32,
}

/// Emitted when an assassin ends the game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameLost {
    /// The turn recorded in the final state.
    pub final_turn: u32,
}

/// Event payload variants for the Duet context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEventKind {
    /// A clue opened a guess phase.
    ClueSubmitted(ClueSubmitted),
    /// An agent was found.
    AgentRevealed(AgentRevealed),
    /// A bystander was hit.
    BystanderGuessed(BystanderGuessed),
    /// An assassin was hit.
    AssassinGuessed(AssassinGuessed),
    /// The guesser stopped early.
    GuessingStopped(GuessingStopped),
    /// The round ended.
    TurnEnded(TurnEnded),
    /// No hidden agents remain.
    GameWon,
    /// The game was lost.
    GameLost(GameLost),
}

/// Domain event envelope for the Duet context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: GameEventKind,
}

impl DomainEvent for GameEvent {
    fn event_type(&self) -> &'static str {
        match &self.kind {
            GameEventKind::ClueSubmitted(_) => "duet.clue_submitted",
            GameEventKind::AgentRevealed(_) => "duet.agent_revealed",
            GameEventKind::BystanderGuessed(_) => "duet.bystander_guessed",
            GameEventKind::AssassinGuessed(_) => "duet.assassin_guessed",
            GameEventKind::GuessingStopped(_) => "duet.guessing_stopped",
            GameEventKind::TurnEnded(_) => "duet.turn_ended",
            GameEventKind::GameWon => "duet.game_won",
            GameEventKind::GameLost(_) => "duet.game_lost",
        }
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("GameEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
