// rust/engine/src/engine/mod.rs
#![forbid(unsafe_code)]

mod config;
mod constants;
mod direction;
mod grid;
mod moves;
mod rules;
mod spawn;
mod tile;

/**
 * Curated engine public API.
 *
 * Internal implementation modules remain private; only stable items are re-exported here.
 */
pub use config::EngineConfig;
pub use constants::{
    DEFAULT_SIZE, FOUR_PROBABILITY, MAX_MERGE_VALUE, MIN_TILE_VALUE, START_TILES,
    SWIPE_MIN_DISTANCE, WIN_VALUE, is_tile_value,
};
pub use direction::Direction;
pub use grid::Grid;
pub use moves::{MoveOutcome, apply_move, moves_available};
pub use rules::Engine;
pub use spawn::TileSpawner;
pub use tile::{MergeSource, Position, Tile, TileId, TileIds};
