//! Duet — stateless HTTP adapter.
//!
//! Every request carries the game blob and every response returns the next
//! one; the server keeps no game state between requests.

use axum::Router;

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod words;

/// Builds the full application router.
pub fn app(app_state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1/games", routes::game::router())
        .with_state(app_state)
}
