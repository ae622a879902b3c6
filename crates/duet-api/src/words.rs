//! Word list loaded from a newline-separated file.

use std::fs;
use std::path::Path;

use duet_core::channel::WordSource;
use duet_core::error::DomainError;
use duet_game::domain::board::BOARD_SIZE;
use tracing::info;

use crate::error::AppError;

/// A word list read once at startup.
#[derive(Debug, Clone)]
pub struct FileWordSource {
    words: Vec<String>,
}

impl FileWordSource {
    /// Reads `path`, one candidate word per line. Blank lines are dropped.
    ///
    /// # Errors
    ///
    /// Returns `AppError::WordList` if the file cannot be read or holds
    /// fewer than 25 words.
    pub fn load(path: &Path) -> Result<Self, AppError> {
        let content = fs::read_to_string(path)
            .map_err(|e| AppError::WordList(format!("{}: {e}", path.display())))?;
        let source = Self::parse(&content);
        if source.words.len() < BOARD_SIZE {
            return Err(AppError::WordList(format!(
                "{} has {} words, {BOARD_SIZE} needed",
                path.display(),
                source.words.len()
            )));
        }
        info!(path = %path.display(), words = source.words.len(), "loaded word list");
        Ok(source)
    }

    /// Splits `content` into trimmed, non-blank lines.
    #[must_use]
    pub fn parse(content: &str) -> Self {
        Self {
            words: content
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }
}

impl WordSource for FileWordSource {
    fn words(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.words.clone())
    }
}
