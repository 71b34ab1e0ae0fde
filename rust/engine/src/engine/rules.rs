// rust/engine/src/engine/rules.rs
#![forbid(unsafe_code)]

use tracing::debug;

use crate::engine::config::EngineConfig;
use crate::engine::direction::Direction;
use crate::engine::grid::Grid;
use crate::engine::moves::{self, MoveOutcome};
use crate::engine::spawn::TileSpawner;
use crate::engine::tile::{Tile, TileIds};
use crate::error::ConfigError;

/// Rules facade: owns the spawn stream and the tile-id generator, and applies moves to
/// grids handed in by the caller.
///
/// Grids are mutated in place. Callers that need the pre-move grid clone it first.
#[derive(Clone, Debug)]
pub struct Engine {
    config: EngineConfig,
    spawner: TileSpawner,
    ids: TileIds,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            spawner: TileSpawner::new(config.seed, config.four_probability),
            ids: TileIds::new(),
        })
    }

    /// Default rules (4x4, two start tiles, 2048 wins) with the given spawn seed.
    pub fn with_seed(seed: u64) -> Self {
        let config = EngineConfig::with_seed(seed);
        Self {
            config,
            spawner: TileSpawner::new(seed, config.four_probability),
            ids: TileIds::new(),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn size(&self) -> usize {
        self.config.size
    }

    /// Fresh grid with `start_tiles` spawned tiles.
    pub fn setup(&mut self) -> Grid {
        let mut grid = Grid::new(self.config.size);
        for _ in 0..self.config.start_tiles {
            self.add_random_tile(&mut grid);
        }
        debug!(size = self.config.size, tiles = grid.tile_count(), "grid set up");
        grid
    }

    pub fn apply_move(&mut self, grid: &mut Grid, direction: Direction) -> MoveOutcome {
        debug_assert_eq!(grid.size(), self.config.size, "grid size differs from engine size");
        moves::apply_move(grid, direction, &mut self.ids, self.config.win_value)
    }

    /// Spawn one 2 (or, rarely, 4) on a random empty cell. `None` if the grid is full.
    pub fn add_random_tile(&mut self, grid: &mut Grid) -> Option<Tile> {
        self.spawner.spawn(grid, &mut self.ids)
    }

    pub fn moves_available(grid: &Grid) -> bool {
        moves::moves_available(grid)
    }

    /// Apply `direction` to a copy of `grid`. Neither the grid nor the live id stream is
    /// touched.
    pub fn simulate(&self, grid: &Grid, direction: Direction) -> (Grid, MoveOutcome) {
        let mut scratch = grid.clone();
        let mut ids = self.ids.clone();
        let outcome = moves::apply_move(&mut scratch, direction, &mut ids, self.config.win_value);
        (scratch, outcome)
    }

    /// Directions that would change `grid`, in `Direction::ALL` order.
    pub fn moving_directions(&self, grid: &Grid) -> Vec<Direction> {
        Direction::ALL
            .into_iter()
            .filter(|&d| self.simulate(grid, d).1.moved)
            .collect()
    }

    /// Take over a grid built elsewhere (e.g. restored from storage): later ids will not
    /// collide with any id already on it.
    pub fn adopt(&mut self, grid: &Grid) {
        if let Some(max) = grid.tiles().map(|t| t.id).max() {
            self.ids.advance_past(max);
        }
    }

    pub(crate) fn ids_mut(&mut self) -> &mut TileIds {
        &mut self.ids
    }
}
