//! Command handlers for the Duet context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: decode on entry, run one engine operation,
//! encode, hand off. The caller owns the `GameState` and threads it through;
//! it is replaced only after the handoff succeeded.

use duet_core::channel::{StateChannel, WordSource};
use duet_core::command::Command;
use duet_core::error::DomainError;
use duet_core::event::DomainEvent;
use duet_core::rng::DeterministicRng;
use tracing::{debug, info, instrument, warn};

use crate::domain::commands::{GuessCard, StopGuessing, SubmitClue};
use crate::domain::events::GameEvent;
use crate::domain::roles::draw_board;
use crate::domain::state::GameState;
use crate::domain::wire::{self, Entry};

/// Reads the entry blob from `channel` and opens it.
///
/// # Errors
///
/// Returns `DomainError::InvalidGameData` if the channel holds no game data
/// or the blob is malformed, and `DomainError::Infrastructure` if the channel
/// or word source fails.
pub fn open_game(
    channel: &dyn StateChannel,
    words: &dyn WordSource,
    rng: &mut dyn DeterministicRng,
) -> Result<GameState, DomainError> {
    let blob = channel
        .read()?
        .ok_or_else(|| DomainError::InvalidGameData("no game data supplied".to_owned()))?;
    open_blob(&blob, words, rng)
}

/// Decodes `blob`; a seed is dealt a board and roles on the spot.
///
/// # Errors
///
/// Returns `DomainError::InvalidGameData` if the blob is malformed or the
/// word list is too short, and `DomainError::Infrastructure` if the word
/// source fails.
pub fn open_blob(
    blob: &str,
    words: &dyn WordSource,
    rng: &mut dyn DeterministicRng,
) -> Result<GameState, DomainError> {
    match wire::decode_entry(blob)? {
        Entry::InProgress(state) => {
            debug!(turn = state.turn(), phase = state.phase().name(), "opened game");
            Ok(state)
        }
        Entry::Seed(seed) => {
            let board = match seed.words {
                Some(board) => board,
                None => draw_board(words.words()?, rng)?,
            };
            let state = GameState::new_game(board, seed.identities, seed.names, rng)?;
            info!("dealt a new board");
            Ok(state)
        }
    }
}

/// Handles the `SubmitClue` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the clue is out of protocol and
/// `DomainError::Infrastructure` if encoding or the handoff fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, turn = state.turn()))]
pub fn handle_submit_clue(
    command: &SubmitClue,
    state: &mut GameState,
    channel: &dyn StateChannel,
) -> Result<Vec<GameEvent>, DomainError> {
    commit(command, state, channel, |next| {
        next.submit_clue(&command.text, command.count, command.correlation_id)
    })
}

/// Handles the `GuessCard` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if the guess is out of protocol and
/// `DomainError::Infrastructure` if encoding or the handoff fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id, index = command.index))]
pub fn handle_guess_card(
    command: &GuessCard,
    state: &mut GameState,
    channel: &dyn StateChannel,
) -> Result<Vec<GameEvent>, DomainError> {
    commit(command, state, channel, |next| {
        next.guess_card(command.index, command.correlation_id)
    })
}

/// Handles the `StopGuessing` command.
///
/// # Errors
///
/// Returns `DomainError::Validation` if no guess phase is active and
/// `DomainError::Infrastructure` if encoding or the handoff fails.
#[instrument(skip_all, fields(correlation_id = %command.correlation_id))]
pub fn handle_stop_guessing(
    command: &StopGuessing,
    state: &mut GameState,
    channel: &dyn StateChannel,
) -> Result<Vec<GameEvent>, DomainError> {
    commit(command, state, channel, |next| {
        next.stop_guessing(command.correlation_id)
    })
}

fn commit<C, F>(
    command: &C,
    state: &mut GameState,
    channel: &dyn StateChannel,
    operation: F,
) -> Result<Vec<GameEvent>, DomainError>
where
    C: Command,
    F: FnOnce(&mut GameState) -> Result<Vec<GameEvent>, DomainError>,
{
    let mut next = state.clone();
    let events = operation(&mut next).inspect_err(|e| {
        warn!(command = command.command_type(), error = %e, "command rejected");
    })?;

    let blob = wire::encode(&next)?;
    channel.write(&blob)?;

    for event in &events {
        debug!(event_type = event.event_type(), "event applied");
    }
    info!(
        command = command.command_type(),
        events = events.len(),
        turn = next.turn(),
        "command handled"
    );

    *state = next;
    Ok(events)
}

#[cfg(test)]
mod tests {
    use duet_core::event::DomainEvent;
    use duet_test_support::{
        FailingChannel, IdentityRng, RecordingChannel, SequenceRng, StaticWordSource, sample_words,
    };
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::domain::board::Player;
    use crate::domain::state::{Outcome, Phase};

    const UUID1: &str = "6f1c1a52-7f7b-4a53-9d7a-1c1d2e3f4a5b";
    const UUID2: &str = "0b9e8d7c-6a5b-4c3d-8e2f-1a0b9c8d7e6f";

    fn seed_blob() -> String {
        json!({ "turn": 1, "uuid": UUID1, "uuid1": UUID1, "uuid2": UUID2, "player1": "Ada", "player2": "Grace" })
            .to_string()
    }

    fn word_source() -> StaticWordSource {
        StaticWordSource(sample_words(30))
    }

    fn opened() -> GameState {
        open_blob(&seed_blob(), &word_source(), &mut IdentityRng).unwrap()
    }

    fn clue(text: &str, count: u32) -> SubmitClue {
        SubmitClue {
            correlation_id: Uuid::new_v4(),
            text: text.to_owned(),
            count,
        }
    }

    fn guess(index: usize) -> GuessCard {
        GuessCard {
            correlation_id: Uuid::new_v4(),
            index,
        }
    }

    // --- open ---

    #[test]
    fn test_open_seed_draws_board_and_deals_roles() {
        let state = opened();

        assert_eq!(state.words(), sample_words(25).as_slice());
        assert_eq!(state.turn(), 1);
        assert_eq!(state.phase(), Phase::Setup);
        assert_eq!(state.agents_remaining(), 15);
        assert_eq!(state.name_of(Player::Two), "Grace");
    }

    #[test]
    fn test_open_seed_with_supplied_words_skips_word_source() {
        let mut words = sample_words(30);
        words.reverse();
        let blob = json!({ "data": &words[..25], "turn": 1, "uuid1": UUID1, "uuid2": UUID2 });

        let state = open_blob(
            &blob.to_string(),
            &StaticWordSource(Vec::new()),
            &mut IdentityRng,
        )
        .unwrap();

        assert_eq!(state.words(), &words[..25]);
    }

    #[test]
    fn test_open_rejects_24_words_before_dealing() {
        let blob = json!({ "data": sample_words(24), "turn": 1, "uuid1": UUID1, "uuid2": UUID2 });
        let mut rng = SequenceRng::new(vec![]);

        let result = open_blob(&blob.to_string(), &word_source(), &mut rng);

        assert!(matches!(result, Err(DomainError::InvalidGameData(_))));
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_open_game_reads_from_channel() {
        let channel = RecordingChannel::new(Some(seed_blob()));

        let state = open_game(&channel, &word_source(), &mut IdentityRng).unwrap();

        assert_eq!(state.phase(), Phase::Setup);
        assert!(channel.written().is_empty());
    }

    #[test]
    fn test_open_game_without_data_is_invalid() {
        let channel = RecordingChannel::new(None);

        let result = open_game(&channel, &word_source(), &mut IdentityRng);

        match result {
            Err(DomainError::InvalidGameData(msg)) => assert_eq!(msg, "no game data supplied"),
            other => panic!("expected InvalidGameData, got {other:?}"),
        }
    }

    #[test]
    fn test_open_game_surfaces_channel_failure() {
        let result = open_game(&FailingChannel, &word_source(), &mut IdentityRng);

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }

    // --- handlers ---

    #[test]
    fn test_each_mutation_hands_off_exactly_one_blob() {
        let channel = RecordingChannel::default();
        let mut state = opened();

        handle_submit_clue(&clue("ocean", 1), &mut state, &channel).unwrap();
        handle_guess_card(&guess(0), &mut state, &channel).unwrap();

        let written = channel.written();
        assert_eq!(written.len(), 2);
        assert_eq!(wire::decode(&written[1]).unwrap(), state);
    }

    #[test]
    fn test_handoff_blob_reopens_to_the_same_state() {
        let channel = RecordingChannel::default();
        let mut state = opened();
        handle_submit_clue(&clue("ocean", 2), &mut state, &channel).unwrap();

        let reopened = open_blob(
            &channel.last_written().unwrap(),
            &word_source(),
            &mut SequenceRng::new(vec![]),
        )
        .unwrap();

        assert_eq!(reopened, state);
        assert_eq!(reopened.clue().unwrap().remaining(), 3);
    }

    #[test]
    fn test_rejected_command_writes_nothing_and_keeps_state() {
        let channel = RecordingChannel::default();
        let mut state = opened();
        let before = state.clone();

        let result = handle_guess_card(&guess(0), &mut state, &channel);

        assert!(matches!(result, Err(DomainError::Validation(_))));
        assert!(channel.written().is_empty());
        assert_eq!(state, before);
    }

    #[test]
    fn test_failed_handoff_keeps_caller_state() {
        let mut state = opened();
        let before = state.clone();

        let result = handle_submit_clue(&clue("ocean", 2), &mut state, &FailingChannel);

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
        assert_eq!(state, before);
    }

    #[test]
    fn test_bystander_scenario_ends_round_after_one_guess() {
        let channel = RecordingChannel::default();
        let mut state = opened();
        handle_submit_clue(&clue("ocean", 2), &mut state, &channel).unwrap();
        assert_eq!(state.clue().unwrap().remaining(), 3);

        let events = handle_guess_card(&guess(21), &mut state, &channel).unwrap();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].event_type(), "duet.bystander_guessed");
        assert!(state.clue().is_none());
        assert_eq!(state.turn(), 2);
        let handed_off = wire::decode(&channel.last_written().unwrap()).unwrap();
        assert_eq!(handed_off.turn(), 2);
        assert!(handed_off.clue().is_none());
    }

    #[test]
    fn test_assassin_scenario_is_terminal() {
        let channel = RecordingChannel::default();
        let mut state = opened();
        handle_submit_clue(&clue("ocean", 2), &mut state, &channel).unwrap();

        handle_guess_card(&guess(15), &mut state, &channel).unwrap();
        let after_loss = state.clone();
        let stop = StopGuessing {
            correlation_id: Uuid::new_v4(),
        };

        assert_eq!(state.outcome(), Some(Outcome::Lose));
        assert_eq!(state.turn(), 2);
        assert!(handle_stop_guessing(&stop, &mut state, &channel).is_err());
        assert!(handle_submit_clue(&clue("again", 1), &mut state, &channel).is_err());
        assert_eq!(state, after_loss);
        assert_eq!(channel.written().len(), 2);
    }

    #[test]
    fn test_full_game_alternating_turns_reaches_win() {
        let channel = RecordingChannel::default();
        let mut state = opened();

        // Player one's view: agents 0..9.
        handle_submit_clue(&clue("first", 8), &mut state, &channel).unwrap();
        for i in 0..9 {
            handle_guess_card(&guess(i), &mut state, &channel).unwrap();
        }
        assert_eq!(state.turn(), 2);
        assert_eq!(state.agents_remaining(), 6);

        // Player two's view: remaining agents 9..15.
        handle_submit_clue(&clue("second", 6), &mut state, &channel).unwrap();
        for i in 9..14 {
            handle_guess_card(&guess(i), &mut state, &channel).unwrap();
        }
        let events = handle_guess_card(&guess(14), &mut state, &channel).unwrap();

        assert_eq!(events.last().unwrap().event_type(), "duet.game_won");
        assert_eq!(state.outcome(), Some(Outcome::Win));
        assert_eq!(state.turn(), 2);
        let handed_off = wire::decode(&channel.last_written().unwrap()).unwrap();
        assert_eq!(handed_off.outcome(), Some(Outcome::Win));
    }
}
