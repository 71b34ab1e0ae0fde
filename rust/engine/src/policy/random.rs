// rust/engine/src/policy/random.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::{Direction, Engine, Grid};

use super::base::Policy;

pub struct RandomPolicy {
    rng: StdRng,
}

impl RandomPolicy {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn choose_move(&mut self, engine: &Engine, grid: &Grid) -> Option<Direction> {
        let dirs = engine.moving_directions(grid);
        let &d = dirs.choose(&mut self.rng)?;
        Some(d)
    }
}
