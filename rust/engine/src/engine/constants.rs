// rust/engine/src/engine/constants.rs
#![forbid(unsafe_code)]

/// Canonical board edge length.
pub const DEFAULT_SIZE: usize = 4;

/// Tiles spawned by `Engine::setup` on a fresh grid.
pub const START_TILES: usize = 2;

/// Merging into this value wins the game.
pub const WIN_VALUE: u32 = 2048;

/// Probability that a spawned tile is a 4 instead of a 2.
pub const FOUR_PROBABILITY: f64 = 0.1;

/// Smallest value a tile can hold.
pub const MIN_TILE_VALUE: u32 = 2;

/// Largest value that can still merge. Its double, `1 << 31`, is the top power of two in a
/// `u32`; tiles of that value slide but never merge.
pub const MAX_MERGE_VALUE: u32 = 1 << 30;

/**
 * Minimum dominant-axis displacement (in input units) for a swipe to count as a move.
 * Displacements at or below this threshold are ignored by `Direction::from_swipe`.
 */
pub const SWIPE_MIN_DISTANCE: f64 = 30.0;

#[inline]
pub fn is_tile_value(value: u32) -> bool {
    value >= MIN_TILE_VALUE && value.is_power_of_two()
}
