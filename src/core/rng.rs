//! Deterministic random number generation with per-round forking.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical shuffle sequences
//! - **Forkable**: Each round gets an independent branch, so a restart
//!   reshuffles the deck without replaying the previous round's order
//!
//! ## Usage
//!
//! ```
//! use splitcards::core::SessionRng;
//!
//! let mut rng = SessionRng::new(42);
//!
//! // First round and restart use different branches
//! let mut round1 = rng.fork();
//! let mut round2 = rng.fork();
//!
//! let mut a = vec![0, 1, 2, 3, 4, 5];
//! let mut b = a.clone();
//! round1.shuffle(&mut a);
//! round2.shuffle(&mut b);
//!
//! // A second session with the same seed reproduces both rounds
//! let mut rng2 = SessionRng::new(42);
//! let mut replay = vec![0, 1, 2, 3, 4, 5];
//! rng2.fork().shuffle(&mut replay);
//! assert_eq!(a, replay);
//! ```

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Deterministic RNG for deck shuffling.
///
/// Uses ChaCha8 for speed while maintaining high-quality randomness. The
/// session holds one `SessionRng` and forks a branch per round.
#[derive(Clone, Debug)]
pub struct SessionRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl SessionRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed from the system entropy source (non-reproducible sessions).
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence. Forks are
    /// counted, so the Nth round of two sessions with the same seed shuffles
    /// identically.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self
            .seed
            .wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self {
            inner: ChaCha8Rng::seed_from_u64(fork_seed),
            seed: fork_seed,
            fork_counter: 0,
        }
    }

    /// The seed this RNG was created with.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fisher-Yates shuffle of a slice in place.
    ///
    /// Exact uniform shuffle: every permutation equally likely.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_shuffle() {
        let mut a: Vec<u32> = (0..12).collect();
        let mut b: Vec<u32> = (0..12).collect();

        SessionRng::new(7).shuffle(&mut a);
        SessionRng::new(7).shuffle(&mut b);
        assert_eq!(a, b);
    }

    #[test]
    fn test_forks_are_independent_but_reproducible() {
        let mut rng1 = SessionRng::new(99);
        let mut rng2 = SessionRng::new(99);

        let mut first = (0..32u32).collect::<Vec<_>>();
        let mut second = first.clone();
        let mut replay = first.clone();

        rng1.fork().shuffle(&mut first);
        rng1.fork().shuffle(&mut second);
        assert_ne!(first, second, "consecutive forks diverge");

        rng2.fork().shuffle(&mut replay);
        assert_eq!(first, replay, "same fork index replays identically");
    }
}
