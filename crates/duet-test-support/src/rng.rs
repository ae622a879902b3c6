//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use duet_core::rng::DeterministicRng;

/// A no-op RNG that always returns `min`. Suitable for tests that do not
/// depend on specific random values.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// An RNG that always returns `max`. A Fisher–Yates shuffle driven by it
/// leaves its input in order, so board layouts become predictable: shared
/// agents at 0..3, player-one agents at 3..9, player-two agents at 9..15,
/// player-one assassins at 15..18, player-two assassins at 18..21.
#[derive(Debug)]
pub struct IdentityRng;

impl DeterministicRng for IdentityRng {
    fn next_u32_range(&mut self, _min: u32, max: u32) -> u32 {
        max
    }
}

/// An RNG that returns values from a predetermined sequence. Panics if the
/// sequence is exhausted. Used in tests that need specific, repeatable random
/// outcomes (e.g., a particular shuffle).
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of values handed out so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, _min: u32, _max: u32) -> u32 {
        let val = self.values[self.index];
        self.index += 1;
        val
    }
}
