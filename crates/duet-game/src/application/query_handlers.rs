//! Query handlers for the Duet context.
//!
//! This module builds read-only view DTOs from a `GameState`, including the
//! admission gate that decides whether the loaded client may act.

use serde::Serialize;

use crate::domain::board::{Player, Role, RoleView};
use crate::domain::state::{GameState, Outcome};

/// What the loaded client is allowed to do with the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Admission {
    /// The viewer is neither player.
    GameFull,
    /// A participant whose turn it is not.
    WaitingForPartner,
    /// The game has an outcome.
    Finished,
    /// A participant whose turn it is.
    Active,
}

impl Admission {
    /// Whether mutation controls are enabled.
    #[must_use]
    pub fn can_act(self) -> bool {
        self == Self::Active
    }
}

/// Applies the admission gate to the loaded client.
///
/// Presentation-level only: the turn engine does not consult it.
#[must_use]
pub fn admission(state: &GameState) -> Admission {
    let Some(seat) = state.identities().viewer_seat() else {
        return Admission::GameFull;
    };
    if state.outcome().is_some() {
        Admission::Finished
    } else if seat == state.active_player() {
        Admission::Active
    } else {
        Admission::WaitingForPartner
    }
}

/// One board position as shown to the viewer.
#[derive(Debug, Serialize)]
pub struct CardView {
    /// Board position.
    pub index: usize,
    /// Displayed word, including guess markers.
    pub word: String,
    /// The role in the key the viewer holds; hidden from non-participants.
    pub role: Option<Role>,
    /// Whether this position has been found as an agent.
    pub revealed: bool,
}

/// The pending clue.
#[derive(Debug, Serialize)]
pub struct ClueView {
    pub text: String,
    pub count: u32,
    pub guesses_left: u32,
}

/// A seat's display name.
#[derive(Debug, Serialize)]
pub struct PlayerView {
    pub name: String,
    /// Whether turn parity selects this seat.
    pub active: bool,
}

/// Read-only view of a game for the loaded client.
#[derive(Debug, Serialize)]
pub struct BoardView {
    pub admission: Admission,
    pub can_act: bool,
    pub phase: &'static str,
    pub turn: u32,
    pub outcome: Option<Outcome>,
    pub player1: PlayerView,
    pub player2: PlayerView,
    pub clue: Option<ClueView>,
    pub agents_remaining: usize,
    pub last_guesses: Vec<String>,
    pub cards: Vec<CardView>,
}

/// Builds the board as the loaded client sees it.
///
/// Each participant holds the key their partner is scored against: player
/// one is shown `view2` and player two is shown `view1`. The view a seat's
/// own guesses are scored against is never shown to that seat.
#[must_use]
pub fn board_view(state: &GameState) -> BoardView {
    let admission = admission(state);
    let seat = state.identities().viewer_seat();
    let active = state.active_player();

    BoardView {
        admission,
        can_act: admission.can_act(),
        phase: state.phase().name(),
        turn: state.turn(),
        outcome: state.outcome(),
        player1: player_view(state, Player::One, active),
        player2: player_view(state, Player::Two, active),
        clue: state.clue().map(|clue| ClueView {
            text: clue.text().to_owned(),
            count: clue.count(),
            guesses_left: clue.remaining(),
        }),
        agents_remaining: state.agents_remaining(),
        last_guesses: state.last_guesses().to_vec(),
        cards: match seat {
            Some(player) => card_views(state.view(player.partner()), true),
            None => card_views(state.view(Player::One), false),
        },
    }
}

fn player_view(state: &GameState, player: Player, active: Player) -> PlayerView {
    PlayerView {
        name: state.name_of(player).to_owned(),
        active: player == active,
    }
}

fn card_views(view: &RoleView, show_roles: bool) -> Vec<CardView> {
    view.cards()
        .iter()
        .enumerate()
        .map(|(index, card)| CardView {
            index,
            word: card.word.clone(),
            role: show_roles.then_some(card.role),
            revealed: card.is_revealed(),
        })
        .collect()
}
