// rust/engine/src/engine/config.rs
#![forbid(unsafe_code)]

use crate::engine::constants::{DEFAULT_SIZE, FOUR_PROBABILITY, START_TILES, WIN_VALUE};
use crate::error::ConfigError;

/// Engine parameters. Plain data; `validate` rejects values the rules cannot honour.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Board edge length, fixed for the engine's lifetime.
    pub size: usize,
    /// Tiles spawned by `setup`.
    pub start_tiles: usize,
    /// Merging into this value reports a win.
    pub win_value: u32,
    /// Probability in [0,1] that a spawned tile is a 4.
    pub four_probability: f64,
    /// Seed for the spawn RNG stream.
    pub seed: u64,
}

impl EngineConfig {
    pub const DEFAULT_SEED: u64 = 0x2048_2048_2048_2048;

    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.size < 2 {
            return Err(ConfigError::Size(self.size));
        }
        if self.start_tiles > self.size * self.size {
            return Err(ConfigError::StartTiles {
                start_tiles: self.start_tiles,
                size: self.size,
            });
        }
        if self.win_value < 4 || !self.win_value.is_power_of_two() {
            return Err(ConfigError::WinValue(self.win_value));
        }
        if !(0.0..=1.0).contains(&self.four_probability) {
            return Err(ConfigError::FourProbability(self.four_probability));
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            start_tiles: START_TILES,
            win_value: WIN_VALUE,
            four_probability: FOUR_PROBABILITY,
            seed: Self::DEFAULT_SEED,
        }
    }
}
