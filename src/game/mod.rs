//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! Randomness is injected into [`GameEngine`] so games can be replayed from a seed.

pub mod action;
pub mod config;
pub mod engine;
pub mod food;
pub mod state;

// Re-export commonly used types
pub use action::{Action, Direction};
pub use config::{ConfigError, GameConfig, MAX_GRID_SIDE};
pub use engine::{GameEngine, GameEvent, StepResult};
pub use food::spawn_food;
pub use state::{Collision, GameState, Position, Snake};
