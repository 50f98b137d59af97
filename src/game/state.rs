use std::time::Duration;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0. Never empty.
    pub body: Vec<Position>,
    /// Current direction of movement
    pub direction: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self { body, direction }
    }

    /// Build a snake from explicit segments, head first
    pub fn from_segments(body: Vec<Position>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "a snake needs at least one segment");
        Self { body, direction }
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Check if position is occupied by any current segment
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Move snake in current direction, growing if should_grow is true
    pub fn move_snake(&mut self, should_grow: bool) {
        let new_head = self.head().moved_in_direction(self.direction);
        self.body.insert(0, new_head);

        if !should_grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Check if the snake is empty (should never happen in practice)
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// Why a tick ended the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    /// Head left the board
    OutOfBounds,
    /// Head ran into the snake's own body
    SelfCollision,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Position,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub level: u32,
    /// Time between ticks at the current level
    pub tick_interval: Duration,
    pub steps: u32,
    pub is_alive: bool,
}

impl GameState {
    /// Create a new game state at level 1
    pub fn new(
        snake: Snake,
        food: Position,
        grid_width: usize,
        grid_height: usize,
        tick_interval: Duration,
    ) -> Self {
        Self {
            snake,
            food,
            grid_width,
            grid_height,
            score: 0,
            level: 1,
            tick_interval,
            steps: 0,
            is_alive: true,
        }
    }

    /// Check if a position is within the grid bounds
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.body.contains(&pos)
    }
}
