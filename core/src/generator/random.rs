use ndarray::Array2;

use super::*;

/// Uniform rejection-sampling placement: keep sampling cells until the
/// requested number of distinct mines is marked. A cell that already
/// holds a mine is simply sampled again. Cheap at the densities this game
/// targets; the expected number of samples grows steeply once the mine
/// count approaches the cell count.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RandomGenerator {
    seed: u64,
}

impl RandomGenerator {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl MinefieldGenerator for RandomGenerator {
    fn generate(self, config: GameConfig) -> Minefield {
        use rand::prelude::*;

        if config.mines() > config.total_cells() / 2 {
            log::warn!(
                "placing {} mines in {} cells, rejection sampling will resample often",
                config.mines(),
                config.total_cells()
            );
        }

        let mut mask: Array2<bool> = Array2::default((config.rows(), config.cols()).to_index());
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: Area = 0;

        while placed < config.mines() {
            let pos: Pos = (
                rng.random_range(0..config.rows()),
                rng.random_range(0..config.cols()),
            );
            if !mask[pos.to_index()] {
                mask[pos.to_index()] = true;
                placed += 1;
            }
        }

        log::debug!(
            "generated {}x{} minefield with {} mines (seed {})",
            config.rows(),
            config.cols(),
            placed,
            self.seed
        );
        Minefield::from_mask(mask)
    }
}
