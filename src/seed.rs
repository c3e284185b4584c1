use rand::Rng;

/// Exclusive upper bound for generated seeds (`2^31 - 1`).
pub const MAX_SEED: u32 = 2_147_483_647;

/// Produces seeds for requests that did not supply one.
pub trait SeedSource: Send + Sync {
    /// Return a value in `[0, MAX_SEED)`.
    fn next_seed(&self) -> u32;
}

/// Uniform random seeds from the thread-local RNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSeed;

impl SeedSource for RandomSeed {
    fn next_seed(&self) -> u32 {
        rand::rng().random_range(0..MAX_SEED)
    }
}
