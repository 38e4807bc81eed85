use rand::Rng;
use rand_chacha::rand_core::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Uniform integer source the directors draw every decision from.
///
/// Injected rather than global so tests can script outcomes and replay
/// seeded runs.
pub trait RandomSource {
    /// A uniformly distributed value in `[low, high)`.
    ///
    /// Returns `low` when the range is empty.
    fn range(&mut self, low: u32, high: u32) -> u32;

    /// `true` with probability `percent / 100`.
    fn chance(&mut self, percent: u32) -> bool {
        self.range(0, 100) < percent
    }
}

/// Deterministic [`RandomSource`] backed by ChaCha8.
///
/// The same seed always replays the same face behaviour.
pub struct SeededRandom {
    rng: ChaCha8Rng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Seed from the thread-local entropy source.
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }
}

impl RandomSource for SeededRandom {
    fn range(&mut self, low: u32, high: u32) -> u32 {
        if low >= high {
            return low;
        }
        self.rng.random_range(low..high)
    }
}
