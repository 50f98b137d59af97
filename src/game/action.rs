/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// The 180-degree reverse of this direction
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// Returns true if turning from self to other would be a 180-degree turn
    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Returns the delta (dx, dy) for moving in this direction
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

/// Input to a single engine step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Turn to a direction before moving (reversals are dropped)
    Move(Direction),
    /// Keep the current heading
    Continue,
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Action::Move(direction)
    }
}

impl From<Option<Direction>> for Action {
    fn from(direction: Option<Direction>) -> Self {
        direction.map(Action::Move).unwrap_or(Action::Continue)
    }
}
