//! Deterministic random number generation for strategies and sessions.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical sequence
//! - **Derivable**: Episode `i` of a session gets its own stream, computed
//!   from the session seed and `i` alone, so episodes can run in any order
//!   or on any thread and still reproduce
//! - **Serializable**: O(1) state capture and restore
//!
//! ## Session Usage
//!
//! ```
//! use breakthrough::core::GameRng;
//!
//! let session = GameRng::new(42);
//! let items: Vec<u32> = (0..1000).collect();
//!
//! // Derivation is deterministic
//! let mut again = GameRng::new(42).derive(1);
//! let mut second = session.derive(1);
//! assert_eq!(again.choose(&items), second.choose(&items));
//! assert_eq!(again.state(), second.state());
//! ```

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const GOLDEN_GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic RNG passed explicitly to every strategy call.
///
/// Uses ChaCha8 for speed while maintaining high quality randomness.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Derive the independent stream with the given index.
    ///
    /// Does not advance or otherwise touch this RNG.
    #[must_use]
    pub fn derive(&self, index: u64) -> Self {
        let derived_seed = self
            .seed
            .wrapping_add(index.wrapping_add(1).wrapping_mul(GOLDEN_GAMMA));
        Self::new(derived_seed)
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
