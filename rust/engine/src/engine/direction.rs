// rust/engine/src/engine/direction.rs
#![forbid(unsafe_code)]

use std::fmt;
use std::str::FromStr;

use crate::engine::constants::SWIPE_MIN_DISTANCE;
use crate::error::ParseDirectionError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    /// Unit movement vector `(dx, dy)`; rows grow downwards.
    #[inline]
    pub fn vector(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
        }
    }

    /// Numeric input codes: 0=Up, 1=Right, 2=Down, 3=Left.
    pub fn from_index(idx: u8) -> Option<Self> {
        Self::ALL.get(idx as usize).copied()
    }

    pub fn index(self) -> u8 {
        match self {
            Direction::Up => 0,
            Direction::Right => 1,
            Direction::Down => 2,
            Direction::Left => 3,
        }
    }

    /// Resolve a completed swipe displacement into a direction.
    ///
    /// The dominant axis must travel more than `SWIPE_MIN_DISTANCE`; horizontal wins only
    /// when strictly larger than vertical. Returns `None` for short or non-finite swipes.
    pub fn from_swipe(dx: f64, dy: f64) -> Option<Self> {
        let (adx, ady) = (dx.abs(), dy.abs());
        if !adx.is_finite() || !ady.is_finite() || adx.max(ady) <= SWIPE_MIN_DISTANCE {
            return None;
        }
        if adx > ady {
            Some(if dx > 0.0 { Direction::Right } else { Direction::Left })
        } else {
            Some(if dy > 0.0 { Direction::Down } else { Direction::Up })
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Right => "right",
            Direction::Down => "down",
            Direction::Left => "left",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts full names, the `w/a/s/d` keys and the initials `u/r/l`, case-insensitively.
/// `d` is Right (its key position), so Down is spelled `down` or `s`.
impl FromStr for Direction {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" | "u" | "w" => Ok(Direction::Up),
            "right" | "r" | "d" => Ok(Direction::Right),
            "down" | "s" => Ok(Direction::Down),
            "left" | "l" | "a" => Ok(Direction::Left),
            _ => Err(ParseDirectionError {
                input: s.to_string(),
            }),
        }
    }
}
