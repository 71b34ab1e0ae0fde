// rust/engine/tests/common/mod.rs
#![allow(dead_code)]

use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt};
use twenty48_engine::{Grid, Position, TileId, TileIds};

static INIT: Once = Once::new();

/// Route engine logs through the test writer. Level from `TEST_LOG`, then `RUST_LOG`, else `warn`.
pub fn init_logging() {
    INIT.call_once(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));
        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// 4x4 grid from row-major values (`0` = empty) plus the id generator that minted its tiles.
pub fn grid4(rows: [[u32; 4]; 4]) -> (Grid, TileIds) {
    let mut ids = TileIds::new();
    let grid = Grid::from_rows(&rows, &mut ids);
    (grid, ids)
}

/// Single populated top row on an otherwise empty 4x4 grid.
pub fn row4(row: [u32; 4]) -> (Grid, TileIds) {
    grid4([row, [0; 4], [0; 4], [0; 4]])
}

pub fn top_row(grid: &Grid) -> Vec<u32> {
    grid.values()[0].clone()
}

/// Identity view of a grid: what must survive a no-op move untouched.
pub fn signature(grid: &Grid) -> Vec<(TileId, u32, Position)> {
    grid.tiles().map(|t| (t.id, t.value, t.position)).collect()
}
