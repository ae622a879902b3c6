//! Commands for the Duet context.

use duet_core::command::Command;
use uuid::Uuid;

/// Command to open a guess phase with a clue.
#[derive(Debug, Clone)]
pub struct SubmitClue {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The clue word.
    pub text: String,
    /// How many cards the clue points at.
    pub count: u32,
}

impl Command for SubmitClue {
    fn command_type(&self) -> &'static str {
        "duet.submit_clue"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to guess one board position.
#[derive(Debug, Clone)]
pub struct GuessCard {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Board position, `0..25`.
    pub index: usize,
}

impl Command for GuessCard {
    fn command_type(&self) -> &'static str {
        "duet.guess_card"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to decline the rest of the guess budget.
#[derive(Debug, Clone)]
pub struct StopGuessing {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for StopGuessing {
    fn command_type(&self) -> &'static str {
        "duet.stop_guessing"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
