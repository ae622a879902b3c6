//! The single record that fully determines a game.

use std::fmt;

use duet_core::error::DomainError;
use duet_core::rng::DeterministicRng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::board::{Player, RoleView};
use super::roles::assign_roles;

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// Every agent in both views was found.
    Win,
    /// An assassin was guessed.
    Lose,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Lose => write!(f, "lose"),
        }
    }
}

/// Turn engine phase, derived from the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Turn 1 before the first clue.
    Setup,
    /// Waiting for a clue.
    ClueGiving,
    /// A clue is pending and guesses remain.
    Guessing,
    /// The game is over.
    Resolved(Outcome),
}

impl Phase {
    /// Returns a snake-case name for this phase.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::ClueGiving => "clue_giving",
            Self::Guessing => "guessing",
            Self::Resolved(_) => "resolved",
        }
    }
}

/// The clue bounding the current guess phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clue {
    pub(crate) text: String,
    pub(crate) count: u32,
    pub(crate) remaining: u32,
}

impl Clue {
    /// The clue word.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The number the clue-giver announced.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Guesses left in this phase.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}

/// Plaintext identity tags used by the admission gate. Not authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identities {
    /// Player one's token.
    pub player1: Uuid,
    /// Player two's token.
    pub player2: Uuid,
    /// Token of the client that loaded this state, if any.
    pub viewer: Option<Uuid>,
}

impl Identities {
    /// The seat `id` occupies, if it is one of the two players.
    #[must_use]
    pub fn seat_of(&self, id: Uuid) -> Option<Player> {
        if id == self.player1 {
            Some(Player::One)
        } else if id == self.player2 {
            Some(Player::Two)
        } else {
            None
        }
    }

    /// The seat of the loaded client, if it is a participant.
    #[must_use]
    pub fn viewer_seat(&self) -> Option<Player> {
        self.viewer.and_then(|id| self.seat_of(id))
    }
}

/// Display names for the two seats.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerNames {
    /// Player one's name.
    pub player1: String,
    /// Player two's name.
    pub player2: String,
}

/// Complete game state. Only the turn engine mutates the views, turn, clue,
/// and outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) words: Vec<String>,
    pub(crate) view1: RoleView,
    pub(crate) view2: RoleView,
    pub(crate) turn: u32,
    pub(crate) clue: Option<Clue>,
    pub(crate) identities: Identities,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) names: PlayerNames,
    pub(crate) last_guesses: Vec<String>,
}

impl GameState {
    /// Deals a fresh game: assigns roles over `words` and starts on turn 1
    /// with no clue.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidGameData` if `words` is not a 25-word board.
    pub fn new_game(
        words: Vec<String>,
        identities: Identities,
        names: PlayerNames,
        rng: &mut dyn DeterministicRng,
    ) -> Result<Self, DomainError> {
        let (view1, view2) = assign_roles(&words, rng)?;
        Ok(Self {
            words,
            view1,
            view2,
            turn: 1,
            clue: None,
            identities,
            outcome: None,
            names,
            last_guesses: Vec::new(),
        })
    }

    /// The board words, in position order.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// The private view owned by `player`.
    #[must_use]
    pub fn view(&self, player: Player) -> &RoleView {
        match player {
            Player::One => &self.view1,
            Player::Two => &self.view2,
        }
    }

    /// Current turn, starting at 1.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// The pending clue, present only while guessing.
    #[must_use]
    pub fn clue(&self) -> Option<&Clue> {
        self.clue.as_ref()
    }

    /// Identity tags of both seats and the loaded client.
    #[must_use]
    pub fn identities(&self) -> &Identities {
        &self.identities
    }

    /// Terminal outcome, once set.
    #[must_use]
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Display names.
    #[must_use]
    pub fn names(&self) -> &PlayerNames {
        &self.names
    }

    /// Display name of `player`.
    #[must_use]
    pub fn name_of(&self, player: Player) -> &str {
        match player {
            Player::One => &self.names.player1,
            Player::Two => &self.names.player2,
        }
    }

    /// Words guessed during the latest guess phase.
    #[must_use]
    pub fn last_guesses(&self) -> &[String] {
        &self.last_guesses
    }

    /// The seat selected by turn parity.
    #[must_use]
    pub fn active_player(&self) -> Player {
        Player::for_turn(self.turn)
    }

    /// The view guesses are evaluated against this turn.
    #[must_use]
    pub fn active_view(&self) -> &RoleView {
        self.view(self.active_player())
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        match (self.outcome, &self.clue) {
            (Some(outcome), _) => Phase::Resolved(outcome),
            (None, Some(_)) => Phase::Guessing,
            (None, None) if self.turn == 1 => Phase::Setup,
            (None, None) => Phase::ClueGiving,
        }
    }

    /// Board positions that are a hidden agent in at least one view.
    pub fn hidden_agent_positions(&self) -> impl Iterator<Item = usize> + '_ {
        self.view1
            .cards()
            .iter()
            .zip(self.view2.cards())
            .enumerate()
            .filter(|(_, (a, b))| a.is_hidden_agent() || b.is_hidden_agent())
            .map(|(i, _)| i)
    }

    /// Count of board positions still hiding an agent in either view.
    #[must_use]
    pub fn agents_remaining(&self) -> usize {
        self.hidden_agent_positions().count()
    }
}
