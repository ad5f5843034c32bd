use alloc::vec::Vec;
use rand::rngs::SmallRng;

use super::*;

/// Generation strategy that draws a random remaining id from the doubled id pool for every cell, filling the board
/// row-major. Drawing without replacement from the pool gives every arrangement the same probability.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomLayoutGenerator {
    seed: u64,
}

impl RandomLayoutGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl LayoutGenerator for RandomLayoutGenerator {
    fn generate(self, config: GameConfig) -> Result<PairLayout> {
        use rand::prelude::*;

        let config = config.validate()?;
        let pair_count = config.pair_count();
        log::debug!(
            "generating {}x{} layout with {} pairs, seed: {}",
            config.rows,
            config.cols,
            pair_count,
            self.seed
        );

        let mut pool: Vec<PairId> = (0..pair_count).chain(0..pair_count).collect();
        let mut pair_ids = Vec::with_capacity(pool.len());

        let mut rng = SmallRng::seed_from_u64(self.seed);
        while !pool.is_empty() {
            let index = rng.random_range(0..pool.len());
            pair_ids.push(pool.remove(index));
        }

        PairLayout::from_shuffled(config.size(), pair_ids)
    }
}
