//! Noise Source - explicit seeded standard-normal stream
//!
//! The integrator never reaches for a global RNG. Callers construct a
//! [`SeededNoise`] (or any other [`NoiseSource`]) and pass it in, so a
//! seed fully determines a trajectory and concurrent trajectories each
//! own a private generator.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Seed used by the reference runs
pub const REFERENCE_SEED: u64 = 1234;

/// Source of independent standard-normal draws
pub trait NoiseSource {
    /// Draw one value from N(0, 1)
    fn standard_normal(&mut self) -> f64;

    /// Draw the per-step pair, first population first
    fn normal_pair(&mut self) -> [f64; 2] {
        let z1 = self.standard_normal();
        let z2 = self.standard_normal();
        [z1, z2]
    }
}

/// `StdRng`-backed noise source
#[derive(Clone, Debug)]
pub struct SeededNoise {
    rng: StdRng,
    seed: u64,
}

impl SeededNoise {
    /// Create from a 64-bit seed
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Independent source for a parallel trajectory
    ///
    /// Derived from this source's seed only, so the result does not depend on
    /// how many values this source has already produced.
    pub fn substream(&self, stream_id: u64) -> Self {
        Self::from_seed(mix_seed(self.seed, stream_id))
    }

    /// Fill a buffer with standard-normal draws
    pub fn fill_normal(&mut self, buffer: &mut [f64]) {
        for value in buffer.iter_mut() {
            *value = self.standard_normal();
        }
    }
}

impl Default for SeededNoise {
    fn default() -> Self {
        Self::from_seed(REFERENCE_SEED)
    }
}

impl NoiseSource for SeededNoise {
    fn standard_normal(&mut self) -> f64 {
        self.rng.sample(StandardNormal)
    }
}

/// SplitMix64 finaliser over (seed, stream)
fn mix_seed(seed: u64, stream_id: u64) -> u64 {
    let mut z = seed ^ stream_id.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
