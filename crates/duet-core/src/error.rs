//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// The state blob failed to decode or violates the board shape.
    #[error("invalid game data: {0}")]
    InvalidGameData(String),

    /// An operation was attempted outside the clue/guess protocol.
    #[error("validation error: {0}")]
    Validation(String),

    /// A transport or word-source error.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_game_data_display_names_the_condition() {
        let err = DomainError::InvalidGameData("board must contain 25 words, found 24".into());

        assert_eq!(
            err.to_string(),
            "invalid game data: board must contain 25 words, found 24"
        );
    }

    #[test]
    fn test_validation_display() {
        let err = DomainError::Validation("a clue is already pending".into());

        assert_eq!(err.to_string(), "validation error: a clue is already pending");
    }
}
