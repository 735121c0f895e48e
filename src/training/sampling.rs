//! Row subsampling per boosting round.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;

/// Uniform row sampler without replacement.
///
/// Each round draws from its own RNG seeded with `seed + round`, so a run is
/// reproducible for a fixed seed regardless of thread count.
#[derive(Debug, Clone, Copy)]
pub struct RowSampler {
    rate: f32,
    seed: u64,
}

impl RowSampler {
    /// `rate` is expected in (0, 1]; configuration validation enforces it.
    pub fn new(rate: f32, seed: u64) -> Self {
        Self { rate, seed }
    }

    /// Whether rows are actually filtered.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.rate < 1.0
    }

    /// Sorted row indices used in `round`.
    pub fn sample(&self, n_rows: usize, round: u32) -> Vec<u32> {
        if !self.is_enabled() || n_rows == 0 {
            return (0..n_rows as u32).collect();
        }

        let sample_size = ((n_rows as f32 * self.rate).ceil() as usize).clamp(1, n_rows);
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed.wrapping_add(round as u64));

        // Partial Fisher-Yates shuffle.
        let mut indices: Vec<u32> = (0..n_rows as u32).collect();
        for i in 0..sample_size {
            let j = rng.gen_range(i..n_rows);
            indices.swap(i, j);
        }

        indices.truncate(sample_size);
        indices.sort_unstable();
        indices
    }
}
