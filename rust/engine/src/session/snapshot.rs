// rust/engine/src/session/snapshot.rs
#![forbid(unsafe_code)]

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::engine::{Grid, Position, Tile, TileId, TileIds, is_tile_value};
use crate::error::RestoreError;

/// One persisted tile. Position is implied by where the cell sits in `GameSnapshot::grid`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    pub value: u32,
    /// Older saves may lack ids; restore mints fresh ones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TileId>,
}

/// Persisted game state.
///
/// `grid` is column-major: `grid[x][y]` is the cell in column `x`, row `y`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    #[serde(default)]
    pub grid: Vec<Vec<Option<CellSnapshot>>>,
    #[serde(default)]
    pub score: u64,
    #[serde(default)]
    pub won: bool,
    #[serde(default)]
    pub over: bool,
    #[serde(default)]
    pub keep_playing: bool,
}

impl GameSnapshot {
    pub fn capture(grid: &Grid, score: u64, won: bool, over: bool, keep_playing: bool) -> Self {
        let n = grid.size() as i32;
        let cells = (0..n)
            .map(|x| {
                (0..n)
                    .map(|y| {
                        grid.cell_tile(Position::new(x, y)).map(|t| CellSnapshot {
                            value: t.value,
                            id: Some(t.id),
                        })
                    })
                    .collect()
            })
            .collect();
        Self {
            grid: cells,
            score,
            won,
            over,
            keep_playing,
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    pub fn from_json(raw: &str) -> Result<Self, RestoreError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Rebuild a `size`x`size` grid, validating shape, values and id uniqueness.
    ///
    /// `ids` is advanced past every restored id before fresh ids are minted for cells that
    /// were saved without one.
    pub fn restore_grid(&self, size: usize, ids: &mut TileIds) -> Result<Grid, RestoreError> {
        let shape_error = |got_rows: usize| RestoreError::GridShape {
            expected: size,
            got_cols: self.grid.len(),
            got_rows,
        };
        if self.grid.len() != size {
            return Err(shape_error(self.grid.first().map_or(0, Vec::len)));
        }
        if let Some(col) = self.grid.iter().find(|col| col.len() != size) {
            return Err(shape_error(col.len()));
        }

        let mut seen = HashSet::new();
        for (x, col) in self.grid.iter().enumerate() {
            for (y, cell) in col.iter().enumerate() {
                let Some(cell) = cell else { continue };
                if !is_tile_value(cell.value) {
                    return Err(RestoreError::InvalidValue {
                        x,
                        y,
                        value: cell.value,
                    });
                }
                if let Some(id) = cell.id {
                    if !seen.insert(id) {
                        return Err(RestoreError::DuplicateId(id));
                    }
                    ids.advance_past(id);
                }
            }
        }

        let mut grid = Grid::new(size);
        for (x, col) in self.grid.iter().enumerate() {
            for (y, cell) in col.iter().enumerate() {
                if let Some(cell) = cell {
                    let id = cell.id.unwrap_or_else(|| ids.next_id());
                    let pos = Position::new(x as i32, y as i32);
                    grid.place_tile(Tile::new(id, pos, cell.value));
                }
            }
        }
        Ok(grid)
    }
}

pub fn parse_best_score(raw: &str) -> Result<u64, RestoreError> {
    raw.trim()
        .parse()
        .map_err(|source| RestoreError::BestScore {
            raw: raw.to_string(),
            source,
        })
}
