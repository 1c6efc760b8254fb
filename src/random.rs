//! Seeded random number generation.

use rand::rngs::StdRng;
use rand::SeedableRng;

/// Creates a deterministic generator from a seed.
///
/// Every stochastic operator in the crate takes its generator as an
/// argument; runs are reproducible by seeding through this function.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Creates a generator seeded from the thread-local entropy source.
pub fn entropy_rng() -> StdRng {
    create_rng(rand::random())
}
