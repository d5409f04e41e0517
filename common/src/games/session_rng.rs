use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seeded randomness for one game session. Every random decision a bot
/// makes goes through here, so replaying a seed replays the game.
pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Derives an independent generator, e.g. for a search running on
    /// another thread.
    pub fn fork(&mut self) -> Self {
        Self::new(self.rng.random())
    }

    pub fn random<T>(&mut self) -> T
    where
        rand::distr::StandardUniform: rand::distr::Distribution<T>,
    {
        self.rng.random()
    }

    pub fn random_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distr::uniform::SampleUniform,
        R: rand::distr::uniform::SampleRange<T>,
    {
        self.rng.random_range(range)
    }

    /// Index drawn with probability proportional to its weight. `None` for
    /// an empty slice or weights that do not form a distribution.
    pub fn choose_weighted(&mut self, weights: &[f64]) -> Option<usize> {
        let distribution: WeightedIndex<f64> = WeightedIndex::new(weights).ok()?;
        Some(distribution.sample(&mut self.rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SessionRng::new(7);
        let mut b = SessionRng::new(7);
        for _ in 0..16 {
            assert_eq!(a.random_range(0..100u32), b.random_range(0..100u32));
        }
    }

    #[test]
    fn test_choose_weighted_skips_zero_weights() {
        let mut rng = SessionRng::new(1);
        for _ in 0..200 {
            let idx = rng.choose_weighted(&[0.0, 1.0, 0.0]).unwrap();
            assert_eq!(idx, 1);
        }
    }

    #[test]
    fn test_choose_weighted_rejects_empty() {
        let mut rng = SessionRng::new(1);
        assert_eq!(rng.choose_weighted(&[]), None);
    }
}
