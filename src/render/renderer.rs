use rand::Rng;
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::layout::ScreenLayout;
use super::overlay::Message;
use crate::game::{GameState, Position};
use crate::input::ControlButton;
use crate::metrics::GameMetrics;
use crate::session::{GameLoop, LoopPhase};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw one frame and return where everything landed, for hit-testing
    pub fn render<R: Rng>(
        &self,
        frame: &mut Frame,
        game: &GameLoop<R>,
        metrics: &GameMetrics,
    ) -> ScreenLayout {
        let state = game.state();
        let phase = game.phase();
        let mut layout = ScreenLayout::compute(frame.area(), state.grid_width, state.grid_height);

        frame.render_widget(self.render_stats(game, metrics), layout.header);
        frame.render_widget(self.render_grid(state, phase), layout.board);

        if let Some(message) = game.overlay().message() {
            let area = layout.place_overlay(message);
            frame.render_widget(Clear, area);
            frame.render_widget(self.render_message(message), area);
        }

        for (button, area) in &layout.buttons {
            frame.render_widget(self.render_button(*button, phase), *area);
        }

        frame.render_widget(self.render_controls(), layout.footer);

        layout
    }

    fn render_grid(&self, state: &GameState, phase: LoopPhase) -> Paragraph<'_> {
        let mut lines = Vec::new();

        for y in 0..state.grid_height {
            let mut spans = Vec::new();

            for x in 0..state.grid_width {
                let pos = Position::new(x as i32, y as i32);

                let cell = if pos == state.snake.head() {
                    if phase == LoopPhase::GameOver {
                        Span::styled(
                            "✖ ",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        )
                    } else {
                        Span::styled(
                            "■ ",
                            Style::default()
                                .fg(Color::Cyan)
                                .add_modifier(Modifier::BOLD),
                        )
                    }
                } else if state.snake.body.contains(&pos) {
                    Span::styled("□ ", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "● ",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled(". ", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Double)
                .border_style(Style::default().fg(Color::White))
                .title(" Snake "),
        )
    }

    fn render_stats<R: Rng>(&self, game: &GameLoop<R>, metrics: &GameMetrics) -> Paragraph<'_> {
        let state = game.state();
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        let stats = Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(state.score.to_string(), value),
            Span::raw("    "),
            Span::styled("Level: ", label),
            Span::styled(state.level.to_string(), value),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(game.high_score().to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Tick: ", label),
            Span::styled(
                format!("{}ms", state.tick_interval.as_millis()),
                Style::default().fg(Color::White),
            ),
        ]);

        let status = match game.phase() {
            LoopPhase::Idle => "Press Enter or click Start",
            LoopPhase::Running => "",
            LoopPhase::Paused => "Paused - Space to resume",
            LoopPhase::GameOver => "Press Enter to play again",
        };

        Paragraph::new(vec![
            stats,
            Line::from(Span::styled(status, Style::default().fg(Color::Gray))),
        ])
        .alignment(Alignment::Center)
    }

    fn render_message<'a>(&self, message: &'a Message) -> Paragraph<'a> {
        let mut text = vec![
            Line::from(""),
            Line::from(Span::styled(
                message.text.as_str(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            )),
        ];

        if let Some(action) = &message.action {
            text.push(Line::from(""));
            text.push(Line::from(vec![
                Span::styled("[Enter] ", Style::default().fg(Color::Gray)),
                Span::styled(
                    action.label.as_str(),
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
            ]));
        }

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Magenta)),
        )
    }

    fn render_button(&self, button: ControlButton, phase: LoopPhase) -> Paragraph<'static> {
        let style = if button.is_enabled(phase) {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Paragraph::new(button.label(phase))
            .alignment(Alignment::Center)
            .style(style)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded),
            )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" / "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" / click board to steer | "),
            Span::styled("Space", Style::default().fg(Color::Cyan)),
            Span::raw(" pause | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
