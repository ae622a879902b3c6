//! State blob codec.
//!
//! The blob is the whole game as JSON. It travels percent-encoded in a
//! `?gamedata=` link parameter and verbatim through the clipboard. Decoding
//! checks shape only (sizes, presence, budget consistency); a well-formed
//! but forged state is accepted as authoritative.

use std::borrow::Cow;

use duet_core::error::DomainError;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, percent_decode_str, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::board::{Card, Role, RoleView, ensure_board_size};
use super::state::{Clue, GameState, Identities, Outcome, PlayerNames};

/// Query parameter carrying the blob in a handoff link.
pub const QUERY_KEY: &str = "gamedata";

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// One card of a serialized role view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardBlob {
    /// Displayed word.
    pub word: String,
    /// Role in this view.
    pub status: Role,
}

/// Serialized clue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClueBlob {
    /// The clue word.
    #[serde(rename = "clue")]
    pub text: String,
    /// The announced count.
    pub count: u32,
    /// Guesses left; absent in blobs from older clients.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remaining: Option<u32>,
}

/// The JSON shape of the state blob.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateBlob {
    /// Board words.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Vec<String>>,
    /// Player one's view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status1: Option<Vec<CardBlob>>,
    /// Player two's view.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status2: Option<Vec<CardBlob>>,
    /// Current turn.
    pub turn: u32,
    /// Pending clue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clue: Option<ClueBlob>,
    /// Token of the client this blob was prepared for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<Uuid>,
    /// Player one's token.
    pub uuid1: Uuid,
    /// Player two's token.
    pub uuid2: Uuid,
    /// Player one's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player1: Option<String>,
    /// Player two's display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player2: Option<String>,
    /// Terminal outcome.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<Outcome>,
    /// Words guessed during the latest guess phase.
    #[serde(default, rename = "lastGuesses", skip_serializing_if = "Vec::is_empty")]
    pub last_guesses: Vec<String>,
}

/// A turn-1 blob without role views; opening it deals a new board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seed {
    /// Board words supplied by the link creator, if any.
    pub words: Option<Vec<String>>,
    /// Identity tags.
    pub identities: Identities,
    /// Display names.
    pub names: PlayerNames,
}

/// What a decoded blob turned out to be.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// No roles dealt yet.
    Seed(Seed),
    /// A game in progress (or finished).
    InProgress(GameState),
}

/// Decodes a blob that must already carry both role views.
///
/// # Errors
///
/// Returns `DomainError::InvalidGameData` if the blob is malformed or is a
/// seed without role views.
pub fn decode(blob: &str) -> Result<GameState, DomainError> {
    match decode_entry(blob)? {
        Entry::InProgress(state) => Ok(state),
        Entry::Seed(_) => Err(DomainError::InvalidGameData(
            "missing role views".to_owned(),
        )),
    }
}

/// Decodes a blob into either a seed or a game.
///
/// The board size is checked before anything else about the roles is
/// looked at.
///
/// # Errors
///
/// Returns `DomainError::InvalidGameData` if the blob is not JSON of the
/// expected shape or violates the board shape.
pub fn decode_entry(blob: &str) -> Result<Entry, DomainError> {
    let parsed: StateBlob = serde_json::from_str(blob)
        .map_err(|e| DomainError::InvalidGameData(format!("malformed state blob: {e}")))?;

    if parsed.turn == 0 {
        return Err(invalid("turn must be at least 1"));
    }
    if let Some(words) = &parsed.data {
        ensure_board_size("board", words.len())?;
    }

    let identities = Identities {
        player1: parsed.uuid1,
        player2: parsed.uuid2,
        viewer: parsed.uuid,
    };
    let names = PlayerNames {
        player1: parsed.player1.unwrap_or_default(),
        player2: parsed.player2.unwrap_or_default(),
    };

    match (parsed.status1, parsed.status2) {
        (None, None) if parsed.turn == 1 && parsed.clue.is_none() && parsed.state.is_none() => {
            Ok(Entry::Seed(Seed {
                words: parsed.data,
                identities,
                names,
            }))
        }
        (Some(status1), Some(status2)) => {
            let words = parsed.data.ok_or_else(|| invalid("missing board words"))?;
            let view1 = view_from_blob("status1", status1)?;
            let view2 = view_from_blob("status2", status2)?;
            let clue = parsed.clue.map(clue_from_blob).transpose()?;
            if clue.is_some() && parsed.state.is_some() {
                return Err(invalid("a finished game cannot have a pending clue"));
            }

            Ok(Entry::InProgress(GameState {
                words,
                view1,
                view2,
                turn: parsed.turn,
                clue,
                identities,
                outcome: parsed.state,
                names,
                last_guesses: parsed.last_guesses,
            }))
        }
        _ => Err(invalid("missing role views")),
    }
}

/// Encodes a game as blob JSON.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if serialization fails.
pub fn encode(state: &GameState) -> Result<String, DomainError> {
    serde_json::to_string(&StateBlob::from(state))
        .map_err(|e| DomainError::Infrastructure(format!("state encoding failed: {e}")))
}

/// Percent-encodes a blob for use as the `gamedata` query value.
#[must_use]
pub fn to_link_param(blob: &str) -> String {
    utf8_percent_encode(blob, COMPONENT).to_string()
}

/// Reverses [`to_link_param`].
///
/// # Errors
///
/// Returns `DomainError::InvalidGameData` if the decoded bytes are not UTF-8.
pub fn from_link_param(param: &str) -> Result<String, DomainError> {
    percent_decode_str(param)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|e| DomainError::InvalidGameData(format!("link parameter is not UTF-8: {e}")))
}

/// Extracts and decodes the `gamedata` value from a raw query string.
///
/// `+` is read as a space, as browsers do for query strings.
///
/// # Errors
///
/// Returns `DomainError::InvalidGameData` if the value is not valid UTF-8
/// once decoded.
pub fn gamedata_from_query(query: &str) -> Result<Option<String>, DomainError> {
    let query = query.strip_prefix('?').unwrap_or(query);
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, _)| *key == QUERY_KEY)
        .map(|(_, value)| from_link_param(&value.replace('+', " ")))
        .transpose()
}

/// Builds the link a player sends to their partner.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the state cannot be encoded.
pub fn handoff_link(base_url: &str, state: &GameState) -> Result<String, DomainError> {
    let blob = encode(state)?;
    Ok(format!("{base_url}?{QUERY_KEY}={}", to_link_param(&blob)))
}

fn invalid(reason: &str) -> DomainError {
    DomainError::InvalidGameData(reason.to_owned())
}

fn view_from_blob(name: &str, cards: Vec<CardBlob>) -> Result<RoleView, DomainError> {
    ensure_board_size(name, cards.len())?;
    Ok(RoleView::new(
        cards
            .into_iter()
            .map(|c| Card {
                word: c.word,
                role: c.status,
            })
            .collect(),
    ))
}

fn clue_from_blob(blob: ClueBlob) -> Result<Clue, DomainError> {
    let remaining = blob.remaining.unwrap_or(blob.count.saturating_add(1));
    if remaining == 0 {
        return Err(invalid("a pending clue must leave at least one guess"));
    }
    Ok(Clue {
        text: blob.text,
        count: blob.count,
        remaining,
    })
}

fn view_to_blob(view: &RoleView) -> Vec<CardBlob> {
    view.cards()
        .iter()
        .map(|c| CardBlob {
            word: c.word.clone(),
            status: c.role,
        })
        .collect()
}

impl From<&GameState> for StateBlob {
    fn from(state: &GameState) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_owned());
        Self {
            data: Some(state.words.clone()),
            status1: Some(view_to_blob(&state.view1)),
            status2: Some(view_to_blob(&state.view2)),
            turn: state.turn,
            clue: state.clue.as_ref().map(|c| ClueBlob {
                text: c.text.clone(),
                count: c.count,
                remaining: Some(c.remaining),
            }),
            uuid: state.identities.viewer,
            uuid1: state.identities.player1,
            uuid2: state.identities.player2,
            player1: non_empty(&state.names.player1),
            player2: non_empty(&state.names.player2),
            state: state.outcome,
            last_guesses: state.last_guesses.clone(),
        }
    }
}
