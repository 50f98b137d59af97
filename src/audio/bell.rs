use std::io::{Stderr, Write, stderr};

use super::{AudioCue, AudioError, Cue};

const BEL: &[u8] = b"\x07";

/// Rings the terminal bell. Writes to stderr by default, which is the
/// stream the TUI draws on.
pub struct TerminalBell<W: Write = Stderr> {
    out: W,
}

impl TerminalBell<Stderr> {
    pub fn new() -> Self {
        Self::with_writer(stderr())
    }
}

impl Default for TerminalBell<Stderr> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalBell<W> {
    pub fn with_writer(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Moves are silent; a level-up rings twice
    fn rings(cue: Cue) -> usize {
        match cue {
            Cue::Move => 0,
            Cue::Eat | Cue::GameOver => 1,
            Cue::LevelUp => 2,
        }
    }
}

impl<W: Write> AudioCue for TerminalBell<W> {
    fn play(&mut self, cue: Cue) -> Result<(), AudioError> {
        let rings = Self::rings(cue);
        if rings == 0 {
            return Ok(());
        }
        for _ in 0..rings {
            self.out.write_all(BEL)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
