//! Uniformly random opponent

use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};

use crate::{Error, Result, ports::MoveSource, tictactoe::Board};

/// Picks uniformly among the empty cells.
#[derive(Debug, Clone)]
pub struct RandomMoves {
    rng: StdRng,
}

impl RandomMoves {
    /// Deterministic source for reproducible simulations.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Source seeded from the operating system.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }
}

impl MoveSource for RandomMoves {
    fn request_opponent_move(&mut self, board: &Board) -> Result<usize> {
        let empty: Vec<usize> = board.empty_positions().collect();
        empty
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::InputClosed)
    }
}
