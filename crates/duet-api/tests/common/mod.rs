//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use duet_core::rng::DeterministicRng;
use duet_test_support::{IdentityRng, StaticWordSource, sample_words};
use http_body_util::BodyExt;
use tower::ServiceExt;

use duet_api::state::AppState;

pub const UUID1: &str = "6f1c1a52-7f7b-4a53-9d7a-1c1d2e3f4a5b";
pub const UUID2: &str = "0b9e8d7c-6a5b-4c3d-8e2f-1a0b9c8d7e6f";

/// Build the full app router with an identity shuffle, so the dealt layout is
/// known: shared agents 0..3, player one's own agents 3..9, player two's own
/// agents 9..15, player one's assassins 15..18, player two's assassins
/// 18..21, bystanders 21..25.
pub fn build_test_app() -> Router {
    build_test_app_with_rng(IdentityRng)
}

/// Build the full app router with a custom RNG.
pub fn build_test_app_with_rng(rng: impl DeterministicRng + Send + 'static) -> Router {
    let rng: Arc<Mutex<dyn DeterministicRng + Send>> = Arc::new(Mutex::new(rng));
    let app_state = AppState::new(rng, Arc::new(StaticWordSource(sample_words(30))));
    duet_api::app(app_state)
}

/// A seed blob opened by `viewer`.
pub fn seed(viewer: &str) -> String {
    serde_json::json!({
        "turn": 1,
        "uuid": viewer,
        "uuid1": UUID1,
        "uuid2": UUID2,
        "player1": "Ada",
        "player2": "Grace",
    })
    .to_string()
}

/// Re-targets a blob at another viewer, as the partner's client does when it
/// opens a handoff link.
pub fn as_viewer(gamedata: &str, viewer: &str) -> String {
    let mut blob: serde_json::Value = serde_json::from_str(gamedata).unwrap();
    blob["uuid"] = serde_json::Value::from(viewer);
    blob.to_string()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let request = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();

    (status, json)
}
