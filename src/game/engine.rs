use std::time::Duration;

use super::{
    action::{Action, Direction},
    config::GameConfig,
    food::spawn_food,
    state::{Collision, GameState, Position, Snake},
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Something that happened during a step, in the order it happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The snake ate the food; `score` is the new total
    Ate { score: u32 },
    /// Score crossed the level threshold; the ticker must switch to `tick_interval`
    LevelUp { level: u32, tick_interval: Duration },
    /// The head hit a wall or the body; the state is frozen
    GameOver(Collision),
}

/// Result of a game step
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StepResult {
    /// Whether the game has terminated
    pub terminated: bool,
    /// `[Ate, LevelUp?]`, `[GameOver]`, or empty for a plain move
    pub events: Vec<GameEvent>,
}

impl StepResult {
    pub fn ate_food(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::Ate { .. }))
    }

    pub fn leveled_up(&self) -> bool {
        self.events
            .iter()
            .any(|event| matches!(event, GameEvent::LevelUp { .. }))
    }

    pub fn collision(&self) -> Option<Collision> {
        self.events.iter().find_map(|event| match event {
            GameEvent::GameOver(collision) => Some(*collision),
            _ => None,
        })
    }
}

/// The game engine that handles all game logic
pub struct GameEngine<R = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine with an entropy-seeded random source
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Reset the game to initial state
    pub fn reset(&mut self) -> GameState {
        let snake = Snake::new(
            self.config.start_position(),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let food = self.spawn_food(&snake);

        GameState::new(
            snake,
            food,
            self.config.grid_width,
            self.config.grid_height,
            self.config.initial_tick(),
        )
    }

    /// Execute one step of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_alive {
            return StepResult {
                terminated: true,
                events: Vec::new(),
            };
        }

        // Update direction based on action (prevent 180° turns)
        match action {
            Action::Move(new_direction) => {
                if !state.snake.direction.is_opposite(new_direction) {
                    state.snake.direction = new_direction;
                }
            }
            Action::Continue => {
                // Keep current direction
            }
        }

        // Calculate new head position
        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        // Check for collisions against the pre-move body
        if let Some(collision) = self.check_collision(state, new_head) {
            state.is_alive = false;
            state.steps += 1;

            return StepResult {
                terminated: true,
                events: vec![GameEvent::GameOver(collision)],
            };
        }

        // Check if snake ate food
        let ate_food = new_head == state.food;

        // Move snake (grow if ate food)
        state.snake.move_snake(ate_food);
        state.steps += 1;

        let mut events = Vec::new();
        if ate_food {
            self.apply_growth(state, &mut events);
        }

        StepResult {
            terminated: false,
            events,
        }
    }

    /// Score the food, maybe level up, and place the next food
    fn apply_growth(&mut self, state: &mut GameState, events: &mut Vec<GameEvent>) {
        state.score += self.config.score_per_food;
        events.push(GameEvent::Ate { score: state.score });

        if state.score >= state.level * self.config.points_per_level {
            state.level += 1;
            state.tick_interval = self.config.next_tick(state.tick_interval);
            tracing::debug!(
                level = state.level,
                interval_ms = state.tick_interval.as_millis() as u64,
                "level up"
            );
            events.push(GameEvent::LevelUp {
                level: state.level,
                tick_interval: state.tick_interval,
            });
        }

        state.food = self.spawn_food(&state.snake);
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<Collision> {
        // Check wall collision
        if !state.is_in_bounds(pos) {
            return Some(Collision::OutOfBounds);
        }

        // Check self-collision
        if state.snake.collides_with_body(pos) {
            return Some(Collision::SelfCollision);
        }

        None
    }

    fn spawn_food(&mut self, snake: &Snake) -> Position {
        spawn_food(
            &mut self.rng,
            self.config.grid_width,
            self.config.grid_height,
            snake,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> GameEngine {
        GameEngine::seeded(GameConfig::default(), 11)
    }

    fn state_with(snake: Snake, food: Position) -> GameState {
        GameState::new(snake, food, 20, 20, Duration::from_millis(150))
    }

    #[test]
    fn test_reset() {
        let mut engine = engine();
        let state = engine.reset();

        assert!(state.is_alive);
        assert_eq!(state.score, 0);
        assert_eq!(state.level, 1);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Position::new(10, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.tick_interval, Duration::from_millis(150));
        assert!(!state.is_occupied_by_snake(state.food));
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 1);
        let mut state = engine.reset();
        state.food = Position::new(0, 0);
        let initial_head = state.snake.head();

        let result = engine.step(&mut state, Action::Continue);

        assert!(!result.terminated);
        assert!(result.events.is_empty());
        assert_eq!(state.steps, 1);
        assert_eq!(state.snake.head(), initial_head.moved_by(1, 0));
        assert_eq!(state.snake.len(), 1);
    }

    #[test]
    fn test_growth_tick() {
        let mut engine = engine();
        let mut state = state_with(
            Snake::new(Position::new(10, 10), Direction::Right, 1),
            Position::new(11, 10),
        );

        let result = engine.step(&mut state, Action::Continue);

        assert!(!result.terminated);
        assert_eq!(result.events, vec![GameEvent::Ate { score: 10 }]);
        assert_eq!(
            state.snake.body,
            vec![Position::new(11, 10), Position::new(10, 10)]
        );
        assert_eq!(state.score, 10);
        assert_ne!(state.food, Position::new(11, 10));
        assert!(!state.is_occupied_by_snake(state.food));
        assert!(state.is_alive);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 1);
        let mut state = GameState::new(
            Snake::new(Position::new(0, 5), Direction::Left, 1),
            Position::new(5, 5),
            10,
            10,
            Duration::from_millis(150),
        );
        let body_before = state.snake.body.clone();

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.terminated);
        assert!(!state.is_alive);
        assert_eq!(
            result.events,
            vec![GameEvent::GameOver(Collision::OutOfBounds)]
        );
        assert_eq!(state.snake.body, body_before);
    }

    #[test]
    fn test_self_collision_on_closed_loop() {
        let mut engine = engine();
        let snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(6, 5),
                Position::new(6, 6),
                Position::new(5, 6),
            ],
            Direction::Right,
        );
        let mut state = state_with(snake, Position::new(15, 15));

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.terminated);
        assert_eq!(result.collision(), Some(Collision::SelfCollision));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_self_collision_by_turning() {
        let mut engine = engine();

        // Body: (5,5), (4,5), (3,5), (2,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 4);
        let mut state = state_with(snake, Position::new(8, 8));

        // Right: (6,5), (5,5), (4,5), (3,5)
        engine.step(&mut state, Action::Continue);
        // Down: (6,6), (6,5), (5,5), (4,5)
        engine.step(&mut state, Action::Move(Direction::Down));
        // Left: (5,6), (6,6), (6,5), (5,5)
        engine.step(&mut state, Action::Move(Direction::Left));
        // Up: (5,5) is still occupied by the tail
        let result = engine.step(&mut state, Action::Move(Direction::Up));

        assert!(result.terminated);
        assert_eq!(result.collision(), Some(Collision::SelfCollision));
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(0, 0);

        // Try to turn 180 degrees (should be ignored)
        engine.step(&mut state, Action::Move(Direction::Left));

        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(11, 10));
    }

    #[test]
    fn test_repeated_turn_is_idempotent() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.food = Position::new(0, 0);

        engine.step(&mut state, Action::Move(Direction::Up));
        engine.step(&mut state, Action::Move(Direction::Up));

        assert_eq!(state.snake.direction, Direction::Up);
        assert_eq!(state.snake.head(), Position::new(10, 8));
    }

    #[test]
    fn test_level_up_on_threshold() {
        let mut engine = engine();
        let mut state = state_with(
            Snake::new(Position::new(10, 10), Direction::Right, 1),
            Position::new(11, 10),
        );
        state.score = 40;

        let result = engine.step(&mut state, Action::Continue);

        assert_eq!(state.score, 50);
        assert_eq!(state.level, 2);
        assert_eq!(state.tick_interval, Duration::from_millis(140));
        assert_eq!(
            result.events,
            vec![
                GameEvent::Ate { score: 50 },
                GameEvent::LevelUp {
                    level: 2,
                    tick_interval: Duration::from_millis(140),
                },
            ]
        );
    }

    #[test]
    fn test_level_up_interval_clamped() {
        let mut engine = engine();
        let mut state = state_with(
            Snake::new(Position::new(10, 10), Direction::Right, 1),
            Position::new(11, 10),
        );
        state.score = 90;
        state.level = 2;
        state.tick_interval = Duration::from_millis(55);

        engine.step(&mut state, Action::Continue);

        assert_eq!(state.level, 3);
        assert_eq!(state.tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_no_level_up_below_threshold() {
        let mut engine = engine();
        let mut state = state_with(
            Snake::new(Position::new(10, 10), Direction::Right, 1),
            Position::new(11, 10),
        );
        state.score = 40;
        state.level = 2;

        let result = engine.step(&mut state, Action::Continue);

        assert_eq!(state.score, 50);
        assert_eq!(state.level, 2);
        assert!(!result.leveled_up());
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = engine();
        let mut state = engine.reset();
        state.is_alive = false;
        let before = state.clone();

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.terminated);
        assert!(result.events.is_empty());
        assert_eq!(state, before);
    }
}
