//! The update loop: lifecycle state machine around the game engine.
//!
//! ```text
//!  Idle --start--> Running --pause--> Paused
//!                   |   ^---resume------'
//!                   '--collision--> GameOver
//!  any --reset--> Idle
//! ```
//!
//! The ticker only runs in `Running`. Ticks, input and rendering are all
//! driven from one task, so the loop is plain `&mut self` with no locking.

use rand::Rng;
use rand::rngs::StdRng;

use super::ticker::Ticker;
use crate::audio::{AudioCue, Cue};
use crate::game::{Collision, Direction, GameEngine, GameEvent, GameState, StepResult};
use crate::render::overlay::{MessageOverlay, OverlayAction, OverlayCommand};
use crate::storage::HighScoreStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Fresh game, ticker stopped
    Idle,
    Running,
    /// Ticker stopped, state frozen
    Paused,
    /// Terminal until reset
    GameOver,
}

pub struct GameLoop<R = StdRng> {
    engine: GameEngine<R>,
    state: GameState,
    phase: LoopPhase,
    pending_direction: Option<Direction>,
    ticker: Ticker,
    overlay: MessageOverlay,
    audio: Box<dyn AudioCue>,
    store: Box<dyn HighScoreStore>,
    high_score: u32,
}

impl<R: Rng> GameLoop<R> {
    pub fn new(
        mut engine: GameEngine<R>,
        audio: Box<dyn AudioCue>,
        store: Box<dyn HighScoreStore>,
    ) -> Self {
        let state = engine.reset();
        let high_score = store.get().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "high score unavailable, starting from 0");
            0
        });

        Self {
            engine,
            state,
            phase: LoopPhase::Idle,
            pending_direction: None,
            ticker: Ticker::new(),
            overlay: MessageOverlay::new(),
            audio,
            store,
            high_score,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn overlay(&self) -> &MessageOverlay {
        &self.overlay
    }

    pub fn pending_direction(&self) -> Option<Direction> {
        self.pending_direction
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Record a heading for the next tick.
    ///
    /// Requests that reverse the committed heading are dropped and leave the
    /// previous request in place. Nothing is accepted while paused.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.phase == LoopPhase::Paused {
            return false;
        }
        if self.state.snake.direction.is_opposite(direction) {
            return false;
        }
        self.pending_direction = Some(direction);
        true
    }

    pub fn start(&mut self) -> bool {
        if self.phase != LoopPhase::Idle {
            return false;
        }
        self.phase = LoopPhase::Running;
        self.ticker.start(self.state.tick_interval);
        self.overlay.hide();
        tracing::info!(
            interval_ms = self.state.tick_interval.as_millis() as u64,
            "game started"
        );
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase != LoopPhase::Running {
            return false;
        }
        self.phase = LoopPhase::Paused;
        self.ticker.stop();
        self.overlay.show("Paused", None);
        tracing::info!(score = self.state.score, "game paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase != LoopPhase::Paused {
            return false;
        }
        self.phase = LoopPhase::Running;
        self.ticker.start(self.state.tick_interval);
        self.overlay.hide();
        tracing::info!("game resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            LoopPhase::Running => self.pause(),
            LoopPhase::Paused => self.resume(),
            LoopPhase::Idle | LoopPhase::GameOver => false,
        }
    }

    /// Back to a fresh idle game from any phase
    pub fn reset(&mut self) {
        self.ticker.stop();
        self.state = self.engine.reset();
        self.phase = LoopPhase::Idle;
        self.pending_direction = None;
        self.overlay.hide();
        tracing::info!("game reset");
    }

    /// Enter: run the overlay's action if it has one, otherwise start
    pub fn confirm(&mut self) {
        match self.overlay.activate() {
            Some(command) => self.run_overlay_command(command),
            None => {
                self.start();
            }
        }
    }

    /// Run the overlay's action, if it shows one
    pub fn activate_overlay(&mut self) {
        if let Some(command) = self.overlay.activate() {
            self.run_overlay_command(command);
        }
    }

    /// Hide the overlay without running its action
    pub fn dismiss_overlay(&mut self) {
        self.overlay.hide();
    }

    pub fn run_overlay_command(&mut self, command: OverlayCommand) {
        match command {
            OverlayCommand::Reset => self.reset(),
        }
    }

    /// Wait for the ticker. Never completes unless the game is running.
    pub async fn next_tick(&mut self) {
        self.ticker.tick().await
    }

    /// Advance the game by one tick and react to what happened
    pub fn on_tick(&mut self) -> StepResult {
        if self.phase != LoopPhase::Running {
            return StepResult::default();
        }

        let action = self.pending_direction.take().into();
        let result = self.engine.step(&mut self.state, action);

        if result.events.is_empty() {
            self.play(Cue::Move);
        }

        for event in &result.events {
            tracing::debug!(?event, steps = self.state.steps, "tick event");
            match *event {
                GameEvent::Ate { .. } => self.play(Cue::Eat),
                GameEvent::LevelUp { tick_interval, .. } => {
                    self.ticker.restart(tick_interval);
                    self.play(Cue::LevelUp);
                }
                GameEvent::GameOver(collision) => self.finish_game(collision),
            }
        }

        result
    }

    fn finish_game(&mut self, collision: Collision) {
        self.ticker.stop();
        self.phase = LoopPhase::GameOver;

        let score = self.state.score;
        tracing::info!(?collision, score, level = self.state.level, "game over");

        if score > self.high_score {
            self.high_score = score;
            if let Err(err) = self.store.set(score) {
                tracing::warn!(error = %err, "failed to persist high score");
            }
        }

        self.play(Cue::GameOver);
        self.overlay.show(
            format!("Game over! Score: {score}"),
            Some(OverlayAction::new("Play again", OverlayCommand::Reset)),
        );
    }

    fn play(&mut self, cue: Cue) {
        if let Err(err) = self.audio.play(cue) {
            tracing::debug!(?cue, error = %err, "audio cue dropped");
        }
    }
}
