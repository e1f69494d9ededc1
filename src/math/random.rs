use rand::{Rng, SeedableRng, rngs::StdRng};

/// Seeded random source shared by the tile solver and the house partitioner
///
/// Every stochastic choice in the crate goes through one of these methods, so
/// a seed plus the order of calls fully determines the output.
#[derive(Debug, Clone)]
pub struct RandomSource {
    rng: StdRng,
}

impl RandomSource {
    /// Create a deterministic random source
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Generic weighted random selection
    ///
    /// Returns an index into `weights` using a cumulative draw. Zero weights are
    /// never chosen while any positive weight exists; when every weight is zero
    /// the choice is uniform. Returns `None` for an empty slice.
    pub fn weighted_choice(&mut self, weights: &[f64]) -> Option<usize> {
        if weights.is_empty() {
            return None;
        }
        if weights.len() == 1 {
            return Some(0);
        }

        let total: f64 = weights.iter().filter(|w| **w > 0.0).sum();
        if total <= 0.0 {
            return Some(self.rng.random_range(0..weights.len()));
        }

        let mut rand_val = self.rng.random::<f64>() * total;
        let mut last_positive = 0;
        for (i, &weight) in weights.iter().enumerate() {
            if weight <= 0.0 {
                continue;
            }
            last_positive = i;
            rand_val -= weight;
            if rand_val <= 0.0 {
                return Some(i);
            }
        }
        Some(last_positive)
    }

    /// Uniform integer in `[low, high)`
    ///
    /// An empty or inverted range yields `low`.
    pub fn range(&mut self, low: i32, high: i32) -> i32 {
        if high <= low {
            return low;
        }
        self.rng.random_range(low..high)
    }
}
