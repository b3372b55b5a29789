//! Seeded shuffle permutations
//!
//! A shuffle is never stored. It is regenerated from `(len, seed)` on every
//! call, so the same seed must always yield the same permutation.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{RngCore, SeedableRng};

/// Mixed into the seed when deriving a reshuffle seed, so the derived seed
/// is not simply the first output of the permutation generator.
const RESHUFFLE_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Deterministic permutation of `0..len`
///
/// Fisher-Yates driven by a generator seeded from `seed`.
pub fn shuffle_order(len: usize, seed: u64) -> Vec<usize> {
    let mut order: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed);
    order.shuffle(&mut rng);
    order
}

/// Seed for the permutation that follows `seed` on a reshuffling wrap
pub fn next_seed(seed: u64) -> u64 {
    StdRng::seed_from_u64(seed ^ RESHUFFLE_SALT).next_u64()
}

/// Random seed for a session that starts shuffling without one
pub fn fresh_seed() -> u64 {
    rand::random()
}
