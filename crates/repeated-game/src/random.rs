//! Seeded pseudo-random number generator
//!
//! Deterministic xorshift64* generator used to sample actions for
//! scripted sessions and test harnesses.

/// Seeded random number generator
///
/// Deterministic: same seed = same sequence
#[derive(Clone, Debug)]
pub struct SeededRng {
    state: u64,
}

impl SeededRng {
    /// Create a new RNG from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        // xorshift has a fixed point at zero
        let state = (seed ^ 0x853c49e6748fea9b).max(1);

        let mut rng = Self { state };
        for _ in 0..8 {
            rng.next_u64();
        }
        rng
    }

    /// Derive an independent stream, e.g. one per agent
    pub fn fork(&self, stream: u32) -> Self {
        let mixed = self.state ^ (stream as u64 + 1).wrapping_mul(0x9e3779b97f4a7c15);
        let mut rng = Self { state: mixed.max(1) };
        rng.next_u64();
        rng
    }

    /// Generate next u64
    pub fn next_u64(&mut self) -> u64 {
        self.state ^= self.state >> 12;
        self.state ^= self.state << 25;
        self.state ^= self.state >> 27;
        self.state.wrapping_mul(0x2545f4914f6cdd1d)
    }

    /// Generate a value in range [0, max)
    pub fn next_range(&mut self, max: usize) -> usize {
        if max == 0 {
            return 0;
        }
        (self.next_u64() % max as u64) as usize
    }
}
