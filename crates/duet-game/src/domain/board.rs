//! Board primitives: roles, cards, per-player role views.

use std::fmt;

use duet_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Number of cards on the board.
pub const BOARD_SIZE: usize = 25;

/// Word written over an agent card once it has been found.
pub const REVEALED_MARKER: &str = "🕵️‍♂️";

/// The hidden identity of a card in one player's view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Must be found to win.
    Agent,
    /// Neutral; guessing it ends the guess phase.
    Bystander,
    /// Guessing it loses the game.
    Assassin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Agent => write!(f, "agent"),
            Self::Bystander => write!(f, "bystander"),
            Self::Assassin => write!(f, "assassin"),
        }
    }
}

/// One of the two seats at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    /// Owns `view1`; active on odd turns.
    One,
    /// Owns `view2`; active on even turns.
    Two,
}

impl Player {
    /// The player whose view is in play on `turn`.
    #[must_use]
    pub fn for_turn(turn: u32) -> Self {
        if turn % 2 == 1 { Self::One } else { Self::Two }
    }

    /// Marker appended to a bystander this player has already guessed.
    #[must_use]
    pub fn marker(self) -> &'static str {
        match self {
            Self::One => "1️⃣",
            Self::Two => "2️⃣",
        }
    }

    /// The other seat.
    #[must_use]
    pub fn partner(self) -> Self {
        match self {
            Self::One => Self::Two,
            Self::Two => Self::One,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::One => write!(f, "player 1"),
            Self::Two => write!(f, "player 2"),
        }
    }
}

/// A board position as seen in one player's view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Displayed word: the board word, an annotated board word, or the reveal marker.
    pub word: String,
    /// The role in this view.
    pub role: Role,
}

impl Card {
    /// Whether this position has been revealed as an agent.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.word == REVEALED_MARKER
    }

    /// Whether this is an agent that has not been found yet.
    #[must_use]
    pub fn is_hidden_agent(&self) -> bool {
        self.role == Role::Agent && !self.is_revealed()
    }
}

/// One player's private, ordered view of the board.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleView(Vec<Card>);

impl RoleView {
    /// Wraps an ordered list of cards.
    #[must_use]
    pub fn new(cards: Vec<Card>) -> Self {
        Self(cards)
    }

    /// Pairs each word with the role at the same position.
    #[must_use]
    pub fn from_roles(words: &[String], roles: &[Role]) -> Self {
        Self(
            words
                .iter()
                .zip(roles)
                .map(|(word, role)| Card {
                    word: word.clone(),
                    role: *role,
                })
                .collect(),
        )
    }

    /// All cards in board order.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.0
    }

    /// The card at `index`, if in range.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.0.get(index)
    }

    /// Number of positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the view has no positions.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Board indices holding `role` in this view.
    #[must_use]
    pub fn indices_of(&self, role: Role) -> Vec<usize> {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, card)| card.role == role)
            .map(|(i, _)| i)
            .collect()
    }

    /// Overwrites the word at `index` with the reveal marker.
    pub(crate) fn reveal(&mut self, index: usize) {
        if let Some(card) = self.0.get_mut(index) {
            REVEALED_MARKER.clone_into(&mut card.word);
        }
    }

    /// Appends `marker` to the word at `index` unless it is already there.
    pub(crate) fn annotate(&mut self, index: usize, marker: &str) {
        if let Some(card) = self.0.get_mut(index) {
            if !card.word.contains(marker) {
                card.word = format!("{} {marker}", card.word);
            }
        }
    }
}

/// Fails unless `found` matches the board size.
///
/// # Errors
///
/// Returns `DomainError::InvalidGameData` naming `what` and the count found.
pub(crate) fn ensure_board_size(what: &str, found: usize) -> Result<(), DomainError> {
    if found == BOARD_SIZE {
        Ok(())
    } else {
        Err(DomainError::InvalidGameData(format!(
            "{what} must contain {BOARD_SIZE} cards, found {found}"
        )))
    }
}
