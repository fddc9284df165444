//! Deterministic input generation.

use rand_chacha::rand_core::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed used by the demos when none is given.
pub const DEFAULT_SEED: u64 = 42;

/// Largest value produced by [`random_vec`].
pub const MAX_VALUE: i32 = 9_999;

/// Generate `len` pseudo-random values in `0..=MAX_VALUE`.
///
/// The same `(len, seed)` pair yields the same vector on every platform.
pub fn random_vec(len: usize, seed: u64) -> Vec<i32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let span = MAX_VALUE as u32 + 1;
    (0..len).map(|_| (rng.next_u32() % span) as i32).collect()
}
