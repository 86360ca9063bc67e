//! Deterministic random number generation for a match.
//!
//! Every random decision a match makes (first mover, void cells, random
//! move selection) draws from one seeded stream, so a match replays
//! identically from its seed and its snapshot restores mid-stream.
//!
//! ```
//! use rust_triad::core::MatchRng;
//!
//! let mut a = MatchRng::new(42);
//! let mut b = MatchRng::new(42);
//! assert_eq!(a.gen_index(16), b.gen_index(16));
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded match RNG.
///
/// Uses ChaCha8 so the stream position can be captured and restored in
/// O(1) regardless of how many numbers were drawn.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(into = "MatchRngState", from = "MatchRngState")]
pub struct MatchRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl MatchRng {
    /// Seeded stream for one match.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Fair coin flip.
    pub fn coin_flip(&mut self) -> bool {
        self.inner.gen_bool(0.5)
    }

    /// Uniform index in `0..len`.
    ///
    /// `len` must be non-zero.
    pub fn gen_index(&mut self, len: usize) -> usize {
        self.inner.gen_range(0..len)
    }

    /// Uniform pick from `slice`; `None` when empty.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Snapshot the stream position.
    #[must_use]
    pub fn state(&self) -> MatchRngState {
        MatchRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Rebuild the stream at a saved position.
    #[must_use]
    pub fn from_state(state: &MatchRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRngState {
    /// Seed the stream was created from
    pub seed: u64,
    /// Position in the ChaCha8 keystream
    pub word_pos: u128,
}

impl From<MatchRng> for MatchRngState {
    fn from(rng: MatchRng) -> Self {
        rng.state()
    }
}

impl From<MatchRngState> for MatchRng {
    fn from(state: MatchRngState) -> Self {
        MatchRng::from_state(&state)
    }
}
