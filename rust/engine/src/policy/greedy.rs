// rust/engine/src/policy/greedy.rs
#![forbid(unsafe_code)]

use crate::engine::{Direction, Engine, Grid};

use super::base::Policy;

/// One-ply lookahead: the moving direction with the largest immediate merge score.
/// Ties go to the earliest direction in `Direction::ALL`.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyPolicy;

impl GreedyPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for GreedyPolicy {
    fn choose_move(&mut self, engine: &Engine, grid: &Grid) -> Option<Direction> {
        let mut best: Option<(Direction, u64)> = None;
        for d in Direction::ALL {
            let (_, outcome) = engine.simulate(grid, d);
            if !outcome.moved {
                continue;
            }
            if best.is_none_or(|(_, s)| outcome.score > s) {
                best = Some((d, outcome.score));
            }
        }
        best.map(|(d, _)| d)
    }
}
