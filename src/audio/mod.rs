//! Audio feedback for game transitions.
//!
//! Cues are fire-and-forget: callers log a failed [`AudioCue::play`] and
//! carry on.

mod bell;

pub use bell::TerminalBell;

use thiserror::Error;

/// Which transition a sound announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Eat,
    GameOver,
    LevelUp,
    Move,
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(#[from] std::io::Error),
}

pub trait AudioCue {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError>;
}

/// Plays nothing. Used for `--mute`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl AudioCue for Silent {
    fn play(&mut self, _cue: Cue) -> Result<(), AudioError> {
        Ok(())
    }
}
