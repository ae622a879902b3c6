//! Test word sources.

use duet_core::channel::WordSource;
use duet_core::error::DomainError;

const SAMPLE: [&str; 30] = [
    "apple", "bark", "castle", "diamond", "engine", "forest", "glove", "harbor", "iron",
    "jungle", "kettle", "lemon", "mirror", "needle", "ocean", "pirate", "queen", "rocket",
    "saddle", "tower", "umbrella", "violin", "whale", "yacht", "zebra", "anchor", "bridge",
    "comet", "dragon", "eagle",
];

/// Returns the first `n` words of a fixed 30-word list.
///
/// # Panics
///
/// Panics if `n` exceeds 30.
#[must_use]
pub fn sample_words(n: usize) -> Vec<String> {
    SAMPLE[..n].iter().map(|w| (*w).to_owned()).collect()
}

/// A word source that always returns the same list.
#[derive(Debug, Clone)]
pub struct StaticWordSource(pub Vec<String>);

impl WordSource for StaticWordSource {
    fn words(&self) -> Result<Vec<String>, DomainError> {
        Ok(self.0.clone())
    }
}
