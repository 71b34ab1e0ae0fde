// rust/engine/src/engine/spawn.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::grid::Grid;
use crate::engine::tile::{Tile, TileIds};

/// Owns the spawn RNG stream: which empty cell, and whether the new tile is a 2 or a 4.
#[derive(Clone, Debug)]
pub struct TileSpawner {
    rng: StdRng,
    four_probability: f64,
}

impl TileSpawner {
    /// `four_probability` must lie in [0, 1]; `EngineConfig::validate` enforces it.
    pub fn new(seed: u64, four_probability: f64) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&four_probability),
            "four probability {four_probability} outside [0, 1]"
        );
        Self {
            rng: StdRng::seed_from_u64(seed),
            four_probability,
        }
    }

    /// 4 with probability `four_probability`, otherwise 2.
    pub fn draw_value(&mut self) -> u32 {
        if self.rng.gen_bool(self.four_probability) {
            4
        } else {
            2
        }
    }

    /// Place one new tile on a uniformly chosen empty cell. No-op on a full grid.
    pub fn spawn(&mut self, grid: &mut Grid, ids: &mut TileIds) -> Option<Tile> {
        let pos = grid.random_empty_cell(&mut self.rng)?;
        let tile = Tile::new(ids.next_id(), pos, self.draw_value());
        grid.place_tile(tile);
        Some(tile)
    }
}
