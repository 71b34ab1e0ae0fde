// rust/engine/src/engine/grid.rs
#![forbid(unsafe_code)]

use rand::prelude::*;

use crate::engine::constants::is_tile_value;
use crate::engine::tile::{Position, Tile, TileIds};

/// Fixed-size square board of optional tiles.
///
/// Coherence: every occupant's `position` equals the cell it is stored in. All mutators
/// keep that true; `is_coherent` checks it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    /// Row-major: index = y * size + x.
    cells: Vec<Option<Tile>>,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Build a grid from row-major values (`0` = empty), minting fresh ids from `ids`.
    ///
    /// Panics if `rows` is not square or holds a non-zero value that is not a power of two.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R], ids: &mut TileIds) -> Self {
        let size = rows.len();
        let mut grid = Self::new(size);
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            assert_eq!(row.len(), size, "row {y} has {} cells, expected {size}", row.len());
            for (x, &value) in row.iter().enumerate() {
                if value != 0 {
                    assert!(is_tile_value(value), "invalid tile value {value} at ({x}, {y})");
                    let pos = Position::new(x as i32, y as i32);
                    grid.place_tile(Tile::new(ids.next_id(), pos, value));
                }
            }
        }
        grid
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn in_bounds(&self, pos: Position) -> bool {
        let n = self.size as i32;
        pos.x >= 0 && pos.x < n && pos.y >= 0 && pos.y < n
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        debug_assert!(
            self.in_bounds(pos),
            "position {} outside {}x{} grid",
            pos,
            self.size,
            self.size
        );
        pos.y as usize * self.size + pos.x as usize
    }

    /// Occupant of `pos`, or `None` when empty or out of bounds.
    #[inline]
    pub fn cell_tile(&self, pos: Position) -> Option<&Tile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells[self.index(pos)].as_ref()
    }

    #[inline]
    pub fn is_occupied(&self, pos: Position) -> bool {
        self.cell_tile(pos).is_some()
    }

    /// Write `tile` into the cell named by its own position, replacing any occupant.
    pub fn place_tile(&mut self, tile: Tile) {
        let idx = self.index(tile.position);
        self.cells[idx] = Some(tile);
    }

    /// Clear the cell at `tile`'s stored position, returning what was there.
    pub fn remove_tile(&mut self, tile: &Tile) -> Option<Tile> {
        let idx = self.index(tile.position);
        self.cells[idx].take()
    }

    /// Move the occupant of `from` to the empty cell `to`, updating its position.
    pub(crate) fn move_tile(&mut self, from: Position, to: Position) {
        if from == to {
            return;
        }
        let from_idx = self.index(from);
        let to_idx = self.index(to);
        debug_assert!(self.cells[to_idx].is_none(), "move onto occupied cell {to}");
        if let Some(mut tile) = self.cells[from_idx].take() {
            tile.position = to;
            self.cells[to_idx] = Some(tile);
        }
    }

    pub(crate) fn tiles_mut(&mut self) -> impl Iterator<Item = &mut Tile> {
        self.cells.iter_mut().filter_map(Option::as_mut)
    }

    /// Empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_none())
            .map(|(i, _)| Position::new((i % self.size) as i32, (i / self.size) as i32))
            .collect()
    }

    /// Uniformly chosen empty cell, or `None` when the grid is full.
    pub fn random_empty_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Position> {
        self.empty_cells().choose(rng).copied()
    }

    #[inline]
    pub fn has_empty_cell(&self) -> bool {
        self.cells.iter().any(Option::is_none)
    }

    /// Occupied cells in row-major order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.cells.iter().filter_map(Option::as_ref)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles().count()
    }

    pub fn value_sum(&self) -> u64 {
        self.tiles().map(|t| u64::from(t.value)).sum()
    }

    pub fn max_value(&self) -> u32 {
        self.tiles().map(|t| t.value).max().unwrap_or(0)
    }

    /// Row-major values, `0` for empty cells.
    pub fn values(&self) -> Vec<Vec<u32>> {
        self.cells
            .chunks(self.size)
            .map(|row| row.iter().map(|c| c.map_or(0, |t| t.value)).collect())
            .collect()
    }

    pub fn is_coherent(&self) -> bool {
        self.cells.iter().enumerate().all(|(i, cell)| match cell {
            None => true,
            Some(t) => {
                t.position == Position::new((i % self.size) as i32, (i / self.size) as i32)
            }
        })
    }

    pub fn render_ascii(&self) -> String {
        let width = self.max_value().max(2).to_string().len();
        let border = format!("+{}+\n", "-".repeat((width + 1) * self.size + 1));
        let mut s = border.clone();
        for row in self.cells.chunks(self.size) {
            s.push('|');
            for cell in row {
                match cell {
                    Some(t) => s.push_str(&format!(" {:>width$}", t.value)),
                    None => s.push_str(&format!(" {:>width$}", ".")),
                }
            }
            s.push_str(" |\n");
        }
        s.push_str(&border);
        s
    }
}
