use crate::RandomGenerator;
use rand::{RngCore, SeedableRng};

/// Source of uniformly distributed 64-bit integers used to pick features
/// and split values while growing trees.
///
/// Implement this to drive tree construction from a scripted sequence.
pub trait RandomSource: Send {
    /// Next value, uniform over the full `u64` range.
    fn next(&mut self) -> u64;

    /// Value in the inclusive range `[min, max]`, computed as
    /// `min + next() % (max - min + 1)`.
    ///
    /// The modulo reduction is slightly biased when the range width does not
    /// divide 2^64. Tree shapes depend on this exact mapping, so keep it.
    ///
    /// # Panics
    ///
    /// Panics if `max < min`.
    fn uniform(&mut self, min: u64, max: u64) -> u64 {
        assert!(max >= min, "uniform({min}, {max}): max must be >= min");
        let span = max - min;
        if span == u64::MAX {
            return self.next();
        }
        min + self.next() % (span + 1)
    }
}

/// Default source backed by the crate's ChaCha generator.
pub struct ChaChaSource {
    rng: RandomGenerator,
}
impl ChaChaSource {
    /// Wraps an already constructed generator.
    pub fn new(rng: RandomGenerator) -> Self {
        Self { rng }
    }
    /// Reproducible source: equal seeds give equal sequences.
    pub fn seed_from_u64(seed: u64) -> Self {
        Self::new(RandomGenerator::seed_from_u64(seed))
    }
    /// Source seeded from the operating system's entropy.
    pub fn from_entropy() -> Self {
        Self::new(RandomGenerator::from_entropy())
    }
}
impl RandomSource for ChaChaSource {
    fn next(&mut self) -> u64 {
        self.rng.next_u64()
    }
}
