use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use super::state::Position;

/// Largest grid side accepted; keeps board coordinates within terminal and `i32` range
pub const MAX_GRID_SIDE: usize = 1000;

/// Reasons a [`GameConfig`] cannot be used
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: usize, height: usize },

    #[error("grid {width}x{height} exceeds the {max}x{max} maximum")]
    GridTooLarge {
        width: usize,
        height: usize,
        max: usize,
    },

    #[error("initial snake of length {length} leaves no free cell for food on a {cells}-cell grid")]
    NoRoomForFood { length: usize, cells: usize },

    #[error("initial snake length {length} does not fit in a grid {width} cells wide")]
    SnakeTooLong { length: usize, width: usize },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    #[error("initial tick of {initial_ms}ms is below the {min_ms}ms floor")]
    TickBelowFloor { initial_ms: u64, min_ms: u64 },

    #[error("failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Initial length of the snake
    pub initial_snake_length: usize,

    /// Points awarded per food eaten
    pub score_per_food: u32,
    /// A level is gained once score reaches `level * points_per_level`
    pub points_per_level: u32,

    /// Tick interval at level 1, in milliseconds
    pub initial_tick_ms: u64,
    /// How much faster each level ticks, in milliseconds
    pub tick_step_ms: u64,
    /// Fastest allowed tick interval, in milliseconds
    pub min_tick_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            initial_snake_length: 1,
            score_per_food: 10,
            points_per_level: 50,
            initial_tick_ms: 150,
            tick_step_ms: 10,
            min_tick_ms: 50,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::EmptyGrid {
                width: self.grid_width,
                height: self.grid_height,
            });
        }
        if self.grid_width > MAX_GRID_SIDE || self.grid_height > MAX_GRID_SIDE {
            return Err(ConfigError::GridTooLarge {
                width: self.grid_width,
                height: self.grid_height,
                max: MAX_GRID_SIDE,
            });
        }
        if self.initial_snake_length == 0 {
            return Err(ConfigError::Zero("initial_snake_length"));
        }
        let cells = self.grid_width * self.grid_height;
        if cells <= self.initial_snake_length {
            return Err(ConfigError::NoRoomForFood {
                length: self.initial_snake_length,
                cells,
            });
        }
        // The body trails left of the start position
        if self.initial_snake_length > self.start_position().x as usize + 1 {
            return Err(ConfigError::SnakeTooLong {
                length: self.initial_snake_length,
                width: self.grid_width,
            });
        }
        if self.score_per_food == 0 {
            return Err(ConfigError::Zero("score_per_food"));
        }
        if self.points_per_level == 0 {
            return Err(ConfigError::Zero("points_per_level"));
        }
        if self.min_tick_ms == 0 {
            return Err(ConfigError::Zero("min_tick_ms"));
        }
        if self.initial_tick_ms < self.min_tick_ms {
            return Err(ConfigError::TickBelowFloor {
                initial_ms: self.initial_tick_ms,
                min_ms: self.min_tick_ms,
            });
        }
        Ok(())
    }

    /// Where the snake's head is placed on reset
    pub fn start_position(&self) -> Position {
        Position::new((self.grid_width / 2) as i32, (self.grid_height / 2) as i32)
    }

    pub fn initial_tick(&self) -> Duration {
        Duration::from_millis(self.initial_tick_ms)
    }

    pub fn tick_step(&self) -> Duration {
        Duration::from_millis(self.tick_step_ms)
    }

    pub fn min_tick(&self) -> Duration {
        Duration::from_millis(self.min_tick_ms)
    }

    /// Interval after leveling up from `current`, clamped at the floor
    pub fn next_tick(&self, current: Duration) -> Duration {
        current.saturating_sub(self.tick_step()).max(self.min_tick())
    }
}
