// rust/engine/src/engine/moves.rs
#![forbid(unsafe_code)]

/*
Move kernel
-----------
One directional move, applied in place:

1. Every tile forgets its merge provenance and snapshots its position.
2. Cells are visited columns-outer, rows-inner. Each axis runs ascending, except that an
   axis whose movement component is positive runs descending, so tiles nearest the target
   wall settle first and never block the tiles behind them.
3. Each tile slides to the farthest empty cell along the vector. If the first blocking
   cell holds an equal value that was not itself produced by a merge in this move, the two
   tiles are replaced by one tile of double value on the blocking cell. Tiles above
   `MAX_MERGE_VALUE` never merge, so doubling cannot overflow.

A tile merges at most once per move: the merged tile carries provenance, and provenance
blocks further merges until the next move clears it.
*/

use tracing::trace;

use crate::engine::direction::Direction;
use crate::engine::grid::Grid;
use crate::engine::tile::{Position, Tile, TileIds};

/// Result of one `apply_move` call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// True iff some tile changed cell or merged. A move that did not change the grid
    /// must not be followed by a spawn.
    pub moved: bool,
    /// Sum of the values of tiles created by merges in this move.
    pub score: u64,
    /// True iff a merge in this move produced exactly the win value.
    pub won: bool,
}

/// Apply `direction` to `grid` in place. New merge tiles take their ids from `ids`.
pub fn apply_move(
    grid: &mut Grid,
    direction: Direction,
    ids: &mut TileIds,
    win_value: u32,
) -> MoveOutcome {
    let vector = direction.vector();
    let (xs, ys) = build_traversals(grid.size(), vector);
    let mut outcome = MoveOutcome::default();

    prepare_tiles(grid);

    for &x in &xs {
        for &y in &ys {
            let cell = Position::new(x, y);
            let Some(tile) = grid.cell_tile(cell).copied() else {
                continue;
            };

            let (farthest, next) = find_farthest_position(grid, cell, vector);

            match grid.cell_tile(next).copied() {
                Some(other) if tile.can_merge_with(&other) && !other.is_merged() => {
                    let merged = Tile::merged(ids.next_id(), &tile, &other);
                    grid.remove_tile(&tile);
                    grid.place_tile(merged);

                    outcome.score += u64::from(merged.value);
                    outcome.won |= merged.value == win_value;
                    // The consumed tile logically travelled to `next`, which is never `cell`.
                    outcome.moved = true;
                }
                _ => {
                    if farthest != cell {
                        grid.move_tile(cell, farthest);
                        outcome.moved = true;
                    }
                }
            }
        }
    }

    debug_assert!(grid.is_coherent());
    trace!(%direction, moved = outcome.moved, score = outcome.score, won = outcome.won, "move applied");
    outcome
}

/// True iff the grid has an empty cell or two orthogonally adjacent equal tiles.
pub fn moves_available(grid: &Grid) -> bool {
    grid.has_empty_cell() || tile_matches_available(grid)
}

fn tile_matches_available(grid: &Grid) -> bool {
    grid.tiles().any(|tile| {
        Direction::ALL.iter().any(|d| {
            grid.cell_tile(tile.position.step(d.vector()))
                .is_some_and(|other| tile.can_merge_with(other))
        })
    })
}

fn prepare_tiles(grid: &mut Grid) {
    for tile in grid.tiles_mut() {
        tile.save_position();
    }
}

/// Column order and row order for the given vector.
fn build_traversals(size: usize, (dx, dy): (i32, i32)) -> (Vec<i32>, Vec<i32>) {
    let n = size as i32;
    let mut xs: Vec<i32> = (0..n).collect();
    let mut ys: Vec<i32> = (0..n).collect();
    if dx == 1 {
        xs.reverse();
    }
    if dy == 1 {
        ys.reverse();
    }
    (xs, ys)
}

/// Returns the farthest empty cell reachable from `cell` and the first cell beyond it,
/// which is either occupied or out of bounds.
fn find_farthest_position(grid: &Grid, cell: Position, vector: (i32, i32)) -> (Position, Position) {
    let mut previous = cell;
    let mut next = cell.step(vector);
    while grid.in_bounds(next) && !grid.is_occupied(next) {
        previous = next;
        next = next.step(vector);
    }
    (previous, next)
}
