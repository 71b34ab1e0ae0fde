// rust/engine/src/engine/tile.rs
#![forbid(unsafe_code)]

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::engine::constants::{MAX_MERGE_VALUE, is_tile_value};

/// Cell coordinate. `x` is the column, `y` the row; `(0, 0)` is the top-left corner.
///
/// Signed so that traversal can step one cell past the border before bounds checks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn step(self, (dx, dy): (i32, i32)) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Stable tile identifier, unique within one `TileIds` generator.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TileId(pub u64);

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic id source scoped to one session. Ids are never handed out twice.
#[derive(Clone, Debug, Default)]
pub struct TileIds {
    next: u64,
}

impl TileIds {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> TileId {
        let id = TileId(self.next);
        self.next += 1;
        id
    }

    /// Ensure every id handed out from now on is strictly greater than `seen`.
    pub fn advance_past(&mut self, seen: TileId) {
        self.next = self.next.max(seen.0.saturating_add(1));
    }
}

/// Copy of a tile consumed by a merge, kept on the merged tile until the next move starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MergeSource {
    pub id: TileId,
    pub value: u32,
    /// Where the consumed tile sat before the move that merged it.
    pub previous_position: Position,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub position: Position,
    /// Snapshot taken at the start of the last move (presentation only).
    pub previous_position: Option<Position>,
    /// Set only on tiles created by a merge during the current move.
    pub merged_from: Option<[MergeSource; 2]>,
}

impl Tile {
    pub fn new(id: TileId, position: Position, value: u32) -> Self {
        debug_assert!(is_tile_value(value), "invalid tile value {value}");
        Self {
            id,
            value,
            position,
            previous_position: None,
            merged_from: None,
        }
    }

    /// Build the tile produced by merging `moving` into `target`, placed on `target`'s cell.
    pub fn merged(id: TileId, moving: &Tile, target: &Tile) -> Self {
        debug_assert!(moving.can_merge_with(target));
        let mut tile = Self::new(id, target.position, moving.value * 2);
        tile.merged_from = Some([moving.merge_source(), target.merge_source()]);
        tile
    }

    fn merge_source(&self) -> MergeSource {
        MergeSource {
            id: self.id,
            value: self.value,
            previous_position: self.previous_position.unwrap_or(self.position),
        }
    }

    /// Start-of-move bookkeeping: forget provenance, remember where we were.
    #[inline]
    pub fn save_position(&mut self) {
        self.merged_from = None;
        self.previous_position = Some(self.position);
    }

    /// Equal values whose double still fits in a `u32`.
    #[inline]
    pub fn can_merge_with(&self, other: &Tile) -> bool {
        self.value == other.value && self.value <= MAX_MERGE_VALUE
    }

    #[inline]
    pub fn is_merged(&self) -> bool {
        self.merged_from.is_some()
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}
