use anyhow::{Context, Result};
use crossterm::{
    event::{
        DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind, MouseButton,
        MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::input::{InputHandler, KeyAction, steer_toward};
use crate::metrics::GameMetrics;
use crate::render::{PointerTarget, Renderer, ScreenLayout};
use crate::session::GameLoop;

/// Interactive play in the terminal
pub struct HumanMode {
    game: GameLoop,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    /// Geometry of the last drawn frame, for mouse hit-testing
    layout: ScreenLayout,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(game: GameLoop) -> Self {
        Self {
            game,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            layout: ScreenLayout::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        tracing::info!("terminal ready");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => {
                            tracing::warn!(error = %err, "failed to read terminal event");
                        }
                        None => self.should_quit = true,
                    }
                }

                // Game logic tick; only completes while the game is running
                _ = self.game.next_tick() => {
                    self.game.on_tick();
                    self.metrics.observe(self.game.phase());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.draw(terminal);
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        tracing::info!(
            games_played = self.metrics.games_played,
            high_score = self.game.high_score(),
            "quitting"
        );

        Ok(())
    }

    /// A failed draw skips the frame
    fn draw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stderr>>) {
        let renderer = &self.renderer;
        let game = &self.game;
        let metrics = &self.metrics;
        let layout = &mut self.layout;

        if let Err(err) = terminal.draw(|frame| {
            *layout = renderer.render(frame, game, metrics);
        }) {
            tracing::warn!(error = %err, "failed to draw frame");
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) => {
                // Only process key press events, not release
                if key.kind != KeyEventKind::Press {
                    return;
                }
                let action = self.input_handler.handle_key_event(key);
                self.apply(action);
            }
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }

        match self.layout.hit(mouse.column, mouse.row) {
            Some(PointerTarget::Button(button)) => {
                let action = button.press(self.game.phase());
                self.apply(action);
            }
            Some(PointerTarget::OverlayAction) => {
                self.game.activate_overlay();
                self.metrics.observe(self.game.phase());
            }
            Some(PointerTarget::Overlay) => self.game.dismiss_overlay(),
            Some(PointerTarget::Board { x, y }) => {
                let head = self.game.state().snake.head();
                if let Some(direction) = steer_toward(head, (x, y)) {
                    self.apply(KeyAction::Turn(direction));
                }
            }
            None => {}
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Turn(direction) => {
                self.game.request_direction(direction);
            }
            KeyAction::Start => {
                self.game.start();
            }
            KeyAction::Confirm => self.game.confirm(),
            KeyAction::TogglePause => {
                self.game.toggle_pause();
            }
            KeyAction::Restart => self.game.reset(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::None => {}
        }

        self.metrics.observe(self.game.phase());
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Silent;
    use crate::game::{Direction, GameConfig, GameEngine};
    use crate::input::ControlButton;
    use crate::session::LoopPhase;
    use crate::storage::MemoryStore;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::layout::Rect;

    fn mode() -> HumanMode {
        let game = GameLoop::new(
            GameEngine::seeded(GameConfig::default(), 9),
            Box::new(Silent),
            Box::new(MemoryStore::default()),
        );
        let mut mode = HumanMode::new(game);
        mode.layout = ScreenLayout::compute(Rect::new(0, 0, 100, 40), 20, 20);
        mode
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(column: u16, row: u16) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        })
    }

    fn button_center(mode: &HumanMode, button: ControlButton) -> (u16, u16) {
        let (_, rect) = mode
            .layout
            .buttons
            .iter()
            .find(|(b, _)| *b == button)
            .copied()
            .unwrap();
        (rect.x + rect.width / 2, rect.y + 1)
    }

    #[test]
    fn test_game_initialization() {
        let mode = mode();
        assert_eq!(mode.game.phase(), LoopPhase::Idle);
        assert_eq!(mode.game.state().score, 0);
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_keyboard_lifecycle() {
        let mut mode = mode();

        mode.handle_event(key(KeyCode::Enter));
        assert_eq!(mode.game.phase(), LoopPhase::Running);

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.game.phase(), LoopPhase::Paused);

        mode.handle_event(key(KeyCode::Char(' ')));
        assert_eq!(mode.game.phase(), LoopPhase::Running);

        mode.handle_event(key(KeyCode::Char('r')));
        assert_eq!(mode.game.phase(), LoopPhase::Idle);

        mode.handle_event(key(KeyCode::Char('q')));
        assert!(mode.should_quit);
    }

    #[test]
    fn test_buttons_drive_the_loop() {
        let mut mode = mode();

        let (col, row) = button_center(&mode, ControlButton::Start);
        mode.handle_event(click(col, row));
        assert_eq!(mode.game.phase(), LoopPhase::Running);

        let (col, row) = button_center(&mode, ControlButton::Up);
        mode.handle_event(click(col, row));
        assert_eq!(mode.game.pending_direction(), Some(Direction::Up));

        let (col, row) = button_center(&mode, ControlButton::Pause);
        mode.handle_event(click(col, row));
        assert_eq!(mode.game.phase(), LoopPhase::Paused);
    }

    #[test]
    fn test_click_on_board_steers() {
        let mut mode = mode();
        let inner = mode.layout.board_inner;
        // Head is at (10,10); click well below it
        mode.handle_event(click(inner.x + 20, inner.y + 17));
        assert_eq!(mode.game.pending_direction(), Some(Direction::Down));

        // Clicking behind the head is a reversal and is dropped
        mode.handle_event(click(inner.x + 2, inner.y + 10));
        assert_eq!(mode.game.pending_direction(), Some(Direction::Down));
    }

    fn finish_game(mode: &mut HumanMode) {
        mode.game.start();
        mode.game.request_direction(Direction::Up);
        while mode.game.phase() == LoopPhase::Running {
            mode.game.on_tick();
        }
        let message = mode.game.overlay().message().cloned().unwrap();
        mode.layout.place_overlay(&message);
    }

    #[test]
    fn test_click_on_play_again_resets() {
        let mut mode = mode();
        finish_game(&mut mode);
        assert_eq!(mode.game.phase(), LoopPhase::GameOver);

        let action = mode.layout.overlay_action.unwrap();
        mode.handle_event(click(action.x + action.width / 2, action.y));

        assert_eq!(mode.game.phase(), LoopPhase::Idle);
        assert!(!mode.game.overlay().is_visible());
        assert_eq!(mode.game.state().score, 0);
    }

    #[test]
    fn test_click_on_message_dismisses_without_steering() {
        let mut mode = mode();
        finish_game(&mut mode);

        let popup = mode.layout.overlay.unwrap();
        mode.handle_event(click(popup.x + 1, popup.y + 1));

        assert!(!mode.game.overlay().is_visible());
        assert_eq!(mode.game.phase(), LoopPhase::GameOver);
        assert_eq!(mode.game.pending_direction(), None);
    }

    #[test]
    fn test_mouse_release_ignored() {
        let mut mode = mode();
        let (col, row) = button_center(&mode, ControlButton::Start);
        mode.handle_event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: col,
            row,
            modifiers: KeyModifiers::NONE,
        }));
        assert_eq!(mode.game.phase(), LoopPhase::Idle);
    }
}
