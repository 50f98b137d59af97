//! Grid Snake - a terminal Snake game with levels and a persisted high score
//!
//! This library provides:
//! - Core game rules (game module)
//! - The idle/running/paused/game-over update loop and its ticker (session module)
//! - Keyboard, button and pointer input (input module)
//! - TUI rendering and message overlays (render module)
//! - Audio cues and high score storage (audio, storage modules)

pub mod audio;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod session;
pub mod storage;
