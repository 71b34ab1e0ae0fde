// rust/engine/src/lib.rs
#![forbid(unsafe_code)]

pub mod engine;
pub mod error;
pub mod policy;
pub mod session;

// Re-export the bits drivers and tests need:
pub use engine::{
    DEFAULT_SIZE, Direction, Engine, EngineConfig, Grid, MoveOutcome, Position, Tile, TileId,
    TileIds, WIN_VALUE, apply_move, moves_available,
};
pub use error::{ConfigError, ParseDirectionError, RestoreError, StoreError};
pub use policy::{GreedyPolicy, Policy, RandomPolicy};
pub use session::{
    BEST_SCORE_KEY, FileStore, GAME_STATE_KEY, GameSnapshot, MemoryStore, Session, Store,
    TurnReport,
};
