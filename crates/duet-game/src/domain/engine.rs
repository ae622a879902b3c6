//! Turn engine: the clue/guess state machine.
//!
//! Each operation validates against the current state, decides the events it
//! produces, and only then applies them. A rejected operation returns
//! `DomainError::Validation` and leaves the state untouched.
//!
//! ```text
//! Setup ──clue──▶ Guessing ──agent (budget left)──▶ Guessing
//!                    │ budget spent / bystander / stop
//!                    ▼
//!               ClueGiving (turn + 1) ──clue──▶ Guessing
//!
//! Guessing ──last hidden agent──▶ Resolved(Win)
//! Guessing ──assassin──▶ Resolved(Lose) (turn + 1)
//! ```

use duet_core::error::DomainError;
use duet_core::event::EventMetadata;
use uuid::Uuid;

use super::board::{BOARD_SIZE, Role};
use super::events::{
    AgentRevealed, AssassinGuessed, BystanderGuessed, ClueSubmitted, GameEvent, GameEventKind,
    GameLost, GuessingStopped, TurnEnded,
};
use super::state::{Clue, GameState, Outcome};

impl GameState {
    /// Opens a guess phase. The budget is `count + 1`; the turn does not change.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game is over, a clue is
    /// already pending, or `text` is blank.
    pub fn submit_clue(
        &mut self,
        text: &str,
        count: u32,
        correlation_id: Uuid,
    ) -> Result<Vec<GameEvent>, DomainError> {
        self.ensure_in_play()?;
        if self.clue.is_some() {
            return Err(DomainError::Validation(
                "a clue is already pending".to_owned(),
            ));
        }
        let text = text.trim();
        if text.is_empty() {
            return Err(DomainError::Validation(
                "clue text must not be empty".to_owned(),
            ));
        }

        Ok(self.record(
            correlation_id,
            vec![GameEventKind::ClueSubmitted(ClueSubmitted {
                text: text.to_owned(),
                count,
                guesses: count.saturating_add(1),
            })],
        ))
    }

    /// Guesses the card at `index`, evaluated against the active view.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game is over, no guess phase
    /// is active, `index` is off the board, or the card was already resolved
    /// for the active player. Returns `DomainError::InvalidGameData` if the
    /// turn counter cannot advance.
    pub fn guess_card(
        &mut self,
        index: usize,
        correlation_id: Uuid,
    ) -> Result<Vec<GameEvent>, DomainError> {
        self.ensure_in_play()?;
        let remaining = self.pending_budget()?;
        if index >= BOARD_SIZE {
            return Err(DomainError::Validation(format!(
                "card {index} is off the board"
            )));
        }

        let player = self.active_player();
        let card = self
            .active_view()
            .get(index)
            .ok_or_else(|| DomainError::Validation(format!("card {index} is off the board")))?;
        if card.is_revealed() {
            return Err(DomainError::Validation(format!(
                "card {index} is already revealed"
            )));
        }
        if card.role == Role::Bystander && card.word.contains(player.marker()) {
            return Err(DomainError::Validation(format!(
                "card {index} was already guessed by {player}"
            )));
        }

        let word = self.words.get(index).cloned().unwrap_or_default();
        let kinds = match card.role {
            Role::Agent => {
                let guesses_left = remaining - 1;
                let still_hidden = self
                    .hidden_agent_positions()
                    .filter(|&i| i != index)
                    .count();
                let mut kinds = vec![GameEventKind::AgentRevealed(AgentRevealed {
                    index,
                    word,
                    guesses_left,
                })];
                if still_hidden == 0 {
                    kinds.push(GameEventKind::GameWon);
                } else if guesses_left == 0 {
                    kinds.push(GameEventKind::TurnEnded(TurnEnded {
                        next_turn: self.next_turn()?,
                    }));
                }
                kinds
            }
            Role::Bystander => vec![
                GameEventKind::BystanderGuessed(BystanderGuessed {
                    index,
                    word,
                    player,
                }),
                GameEventKind::TurnEnded(TurnEnded {
                    next_turn: self.next_turn()?,
                }),
            ],
            Role::Assassin => vec![
                GameEventKind::AssassinGuessed(AssassinGuessed { index, word }),
                GameEventKind::GameLost(GameLost {
                    final_turn: self.next_turn()?,
                }),
            ],
        };

        Ok(self.record(correlation_id, kinds))
    }

    /// Declines the rest of the guess budget and passes the turn.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the game is over or no guess
    /// phase is active, and `DomainError::InvalidGameData` if the turn
    /// counter cannot advance.
    pub fn stop_guessing(&mut self, correlation_id: Uuid) -> Result<Vec<GameEvent>, DomainError> {
        self.ensure_in_play()?;
        let forfeited = self.pending_budget()?;
        let next_turn = self.next_turn()?;

        Ok(self.record(
            correlation_id,
            vec![
                GameEventKind::GuessingStopped(GuessingStopped { forfeited }),
                GameEventKind::TurnEnded(TurnEnded { next_turn }),
            ],
        ))
    }

    fn ensure_in_play(&self) -> Result<(), DomainError> {
        match self.outcome {
            Some(outcome) => Err(DomainError::Validation(format!(
                "game is already over ({outcome})"
            ))),
            None => Ok(()),
        }
    }

    fn pending_budget(&self) -> Result<u32, DomainError> {
        match &self.clue {
            Some(clue) if clue.remaining > 0 => Ok(clue.remaining),
            _ => Err(DomainError::Validation(
                "no guess phase is active".to_owned(),
            )),
        }
    }

    fn next_turn(&self) -> Result<u32, DomainError> {
        self.turn.checked_add(1).ok_or_else(|| {
            DomainError::InvalidGameData(format!("turn {} cannot advance", self.turn))
        })
    }

    fn record(&mut self, correlation_id: Uuid, kinds: Vec<GameEventKind>) -> Vec<GameEvent> {
        kinds
            .into_iter()
            .map(|kind| {
                let event = GameEvent {
                    metadata: EventMetadata {
                        correlation_id,
                        turn: self.turn,
                    },
                    kind,
                };
                self.apply(&event.kind);
                event
            })
            .collect()
    }

    fn apply(&mut self, kind: &GameEventKind) {
        match kind {
            GameEventKind::ClueSubmitted(payload) => {
                self.clue = Some(Clue {
                    text: payload.text.clone(),
                    count: payload.count,
                    remaining: payload.guesses,
                });
                self.last_guesses.clear();
            }
            GameEventKind::AgentRevealed(payload) => {
                self.view1.reveal(payload.index);
                self.view2.reveal(payload.index);
                self.set_budget(payload.guesses_left);
                self.last_guesses.push(payload.word.clone());
            }
            GameEventKind::BystanderGuessed(payload) => {
                let marker = payload.player.marker();
                self.view1.annotate(payload.index, marker);
                self.view2.annotate(payload.index, marker);
                self.set_budget(0);
                self.last_guesses.push(payload.word.clone());
            }
            GameEventKind::AssassinGuessed(payload) => {
                self.set_budget(0);
                self.last_guesses.push(payload.word.clone());
            }
            GameEventKind::GuessingStopped(_) => self.set_budget(0),
            GameEventKind::TurnEnded(payload) => {
                self.clue = None;
                self.turn = payload.next_turn;
            }
            GameEventKind::GameWon => {
                self.clue = None;
                self.outcome = Some(Outcome::Win);
            }
            GameEventKind::GameLost(payload) => {
                self.clue = None;
                self.turn = payload.final_turn;
                self.outcome = Some(Outcome::Lose);
            }
        }
    }

    fn set_budget(&mut self, remaining: u32) {
        if let Some(clue) = self.clue.as_mut() {
            clue.remaining = remaining;
        }
    }
}
