// rust/engine/src/error.rs
#![forbid(unsafe_code)]

use thiserror::Error;

use crate::engine::TileId;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid size must be at least 2, got {0}")]
    Size(usize),
    #[error("cannot start with {start_tiles} tiles on a {size}x{size} grid")]
    StartTiles { start_tiles: usize, size: usize },
    #[error("win value must be a power of two >= 4, got {0}")]
    WinValue(u32),
    #[error("four-tile probability must lie in [0, 1], got {0}")]
    FourProbability(f64),
}

#[derive(Debug, Error)]
#[error("unrecognised direction {input:?} (expected up/right/down/left)")]
pub struct ParseDirectionError {
    pub input: String,
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O failed for key {key:?}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
}

/// Why a persisted game could not be restored. Callers fall back to a fresh game.
#[derive(Debug, Error)]
pub enum RestoreError {
    #[error("game state is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("best score {raw:?} is not an integer")]
    BestScore {
        raw: String,
        #[source]
        source: std::num::ParseIntError,
    },
    #[error("grid is {got_cols}x{got_rows}, expected {expected}x{expected}")]
    GridShape {
        expected: usize,
        got_cols: usize,
        got_rows: usize,
    },
    #[error("cell ({x}, {y}) holds invalid tile value {value}")]
    InvalidValue { x: usize, y: usize, value: u32 },
    #[error("tile id {0} appears more than once")]
    DuplicateId(TileId),
}
