//! Routes for playing a game over HTTP.
//!
//! The request carries the blob in and the response carries the next blob
//! out. A [`RequestChannel`] stands in for the link on the way in and for the
//! clipboard on the way out. The admission gate is reported in the board
//! view but not enforced here.

use std::sync::{Mutex, PoisonError};

use axum::extract::{RawQuery, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use duet_core::channel::StateChannel;
use duet_core::error::DomainError;
use duet_core::event::DomainEvent;
use duet_game::application::command_handlers;
use duet_game::application::query_handlers::{BoardView, board_view};
use duet_game::domain::commands;
use duet_game::domain::events::GameEvent;
use duet_game::domain::state::GameState;
use duet_game::domain::wire;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Single-request stand-in for the link/clipboard pair.
#[derive(Debug)]
pub struct RequestChannel {
    inbound: Option<String>,
    outbound: Mutex<Option<String>>,
}

impl RequestChannel {
    /// Opens a channel that reads back `inbound`.
    #[must_use]
    pub fn new(inbound: Option<String>) -> Self {
        Self {
            inbound,
            outbound: Mutex::new(None),
        }
    }

    /// Takes the last blob written, if any.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the channel lock is poisoned.
    pub fn take_written(&self) -> Result<Option<String>, DomainError> {
        Ok(self.outbound.lock().map_err(poisoned)?.take())
    }
}

impl StateChannel for RequestChannel {
    fn read(&self) -> Result<Option<String>, DomainError> {
        Ok(self.inbound.clone())
    }

    fn write(&self, blob: &str) -> Result<(), DomainError> {
        *self.outbound.lock().map_err(poisoned)? = Some(blob.to_owned());
        Ok(())
    }
}

fn poisoned<T>(_: PoisonError<T>) -> DomainError {
    DomainError::Infrastructure("request channel lock poisoned".to_owned())
}

/// Request body for POST /clue.
#[derive(Debug, Deserialize)]
pub struct ClueRequest {
    /// The current state blob, as JSON text.
    pub gamedata: String,
    /// The clue word.
    pub text: String,
    /// How many cards the clue points at.
    pub count: u32,
}

/// Request body for POST /guess.
#[derive(Debug, Deserialize)]
pub struct GuessRequest {
    /// The current state blob, as JSON text.
    pub gamedata: String,
    /// Board position, 0 to 24.
    pub index: usize,
}

/// Request body for POST /stop.
#[derive(Debug, Deserialize)]
pub struct StopRequest {
    /// The current state blob, as JSON text.
    pub gamedata: String,
}

/// One produced event.
#[derive(Debug, Serialize)]
pub struct EventView {
    pub event_type: &'static str,
    pub turn: u32,
    pub payload: serde_json::Value,
}

impl From<&GameEvent> for EventView {
    fn from(event: &GameEvent) -> Self {
        Self {
            event_type: event.event_type(),
            turn: event.metadata().turn,
            payload: event.to_payload(),
        }
    }
}

/// Response body for GET /view.
#[derive(Debug, Serialize)]
pub struct ViewResponse {
    /// The state blob after opening; a seed comes back dealt.
    pub gamedata: String,
    /// `gamedata`, percent-encoded for a `?gamedata=` link.
    pub link_param: String,
    pub board: BoardView,
}

/// Response body returned after a command is successfully handled.
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    /// The blob to hand to the partner.
    pub gamedata: String,
    /// `gamedata`, percent-encoded for a `?gamedata=` link.
    pub link_param: String,
    pub events: Vec<EventView>,
    pub board: BoardView,
}

fn open(app: &AppState, channel: &RequestChannel) -> Result<GameState, DomainError> {
    let mut rng = app
        .rng
        .lock()
        .map_err(|_| DomainError::Infrastructure("rng lock poisoned".to_owned()))?;
    command_handlers::open_game(channel, app.word_source.as_ref(), &mut *rng)
}

fn execute<F>(app: &AppState, gamedata: String, handle: F) -> Result<CommandResponse, DomainError>
where
    F: FnOnce(&mut GameState, &RequestChannel) -> Result<Vec<GameEvent>, DomainError>,
{
    let channel = RequestChannel::new(Some(gamedata));
    let mut game = open(app, &channel)?;
    let events = handle(&mut game, &channel)?;
    let gamedata = channel.take_written()?.ok_or_else(|| {
        DomainError::Infrastructure("command produced no handoff blob".to_owned())
    })?;

    Ok(CommandResponse {
        link_param: wire::to_link_param(&gamedata),
        gamedata,
        events: events.iter().map(EventView::from).collect(),
        board: board_view(&game),
    })
}

/// GET /view?gamedata=
#[instrument(skip_all)]
async fn view(
    State(app): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ViewResponse>, ApiError> {
    let inbound = query
        .as_deref()
        .map(wire::gamedata_from_query)
        .transpose()?
        .flatten();
    let channel = RequestChannel::new(inbound);
    let game = open(&app, &channel)?;
    let gamedata = wire::encode(&game)?;

    info!(turn = game.turn(), phase = game.phase().name(), "viewing game");

    Ok(Json(ViewResponse {
        link_param: wire::to_link_param(&gamedata),
        gamedata,
        board: board_view(&game),
    }))
}

/// POST /clue
#[instrument(skip(app, request), fields(count = request.count))]
async fn submit_clue(
    State(app): State<AppState>,
    Json(request): Json<ClueRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::SubmitClue {
        correlation_id: Uuid::new_v4(),
        text: request.text,
        count: request.count,
    };

    info!(correlation_id = %command.correlation_id, "handling submit_clue command");

    let response = execute(&app, request.gamedata, |game, channel| {
        command_handlers::handle_submit_clue(&command, game, channel)
    })?;

    Ok(Json(response))
}

/// POST /guess
#[instrument(skip(app, request), fields(index = request.index))]
async fn guess_card(
    State(app): State<AppState>,
    Json(request): Json<GuessRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::GuessCard {
        correlation_id: Uuid::new_v4(),
        index: request.index,
    };

    info!(correlation_id = %command.correlation_id, "handling guess_card command");

    let response = execute(&app, request.gamedata, |game, channel| {
        command_handlers::handle_guess_card(&command, game, channel)
    })?;

    Ok(Json(response))
}

/// POST /stop
#[instrument(skip_all)]
async fn stop_guessing(
    State(app): State<AppState>,
    Json(request): Json<StopRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let command = commands::StopGuessing {
        correlation_id: Uuid::new_v4(),
    };

    info!(correlation_id = %command.correlation_id, "handling stop_guessing command");

    let response = execute(&app, request.gamedata, |game, channel| {
        command_handlers::handle_stop_guessing(&command, game, channel)
    })?;

    Ok(Json(response))
}

/// Returns the router for game play.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/view", get(view))
        .route("/clue", post(submit_clue))
        .route("/guess", post(guess_card))
        .route("/stop", post(stop_guessing))
}
