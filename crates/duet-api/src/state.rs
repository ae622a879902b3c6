//! Shared application state.

use std::fmt;
use std::sync::{Arc, Mutex};

use duet_core::channel::WordSource;
use duet_core::rng::DeterministicRng;

/// Application state shared across all request handlers.
///
/// Holds no game state: only the RNG used to deal new boards and the
/// read-only word list.
#[derive(Clone)]
pub struct AppState {
    /// Randomness for role assignment and board drawing.
    pub rng: Arc<Mutex<dyn DeterministicRng + Send>>,
    /// Candidate words for seeds without a board.
    pub word_source: Arc<dyn WordSource>,
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(
        rng: Arc<Mutex<dyn DeterministicRng + Send>>,
        word_source: Arc<dyn WordSource>,
    ) -> Self {
        Self { rng, word_source }
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}
