// rust/engine/src/policy/base.rs
#![forbid(unsafe_code)]

use crate::engine::{Direction, Engine, Grid};

/// Policy chooses a direction for the current grid.
///
/// Returns a direction that changes `grid`, or `None` if no direction does.
///
/// Object-safe so it can be used as `Box<dyn Policy>`.
pub trait Policy {
    fn choose_move(&mut self, engine: &Engine, grid: &Grid) -> Option<Direction>;
}
