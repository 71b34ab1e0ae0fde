// rust/engine/src/session/mod.rs
#![forbid(unsafe_code)]

mod snapshot;
mod state;
mod store;

/**
 * Session layer: score bookkeeping around the engine, plus the persisted-state shape and
 * the key/value store it is written through.
 */
pub use snapshot::{CellSnapshot, GameSnapshot, parse_best_score};
pub use state::{Session, TurnReport};
pub use store::{BEST_SCORE_KEY, FileStore, GAME_STATE_KEY, MemoryStore, Store};
