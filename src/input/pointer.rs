//! Steering by pointing at the board (mouse click or touch)

use crate::game::{Direction, Position};

/// Direction from the snake's head toward a point, both in grid units.
///
/// The head is anchored at its cell's top-left corner. The dominant axis of
/// the offset wins, with ties going to the vertical axis; a zero offset on
/// the chosen axis requests nothing.
pub fn steer_toward(head: Position, point: (f32, f32)) -> Option<Direction> {
    let dx = point.0 - head.x as f32;
    let dy = point.1 - head.y as f32;

    if dx.abs() > dy.abs() {
        if dx > 0.0 {
            Some(Direction::Right)
        } else {
            Some(Direction::Left)
        }
    } else if dy > 0.0 {
        Some(Direction::Down)
    } else if dy < 0.0 {
        Some(Direction::Up)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEAD: Position = Position { x: 10, y: 10 };

    #[test]
    fn test_horizontal_dominant() {
        assert_eq!(steer_toward(HEAD, (15.0, 12.0)), Some(Direction::Right));
        assert_eq!(steer_toward(HEAD, (2.5, 9.0)), Some(Direction::Left));
    }

    #[test]
    fn test_vertical_dominant() {
        assert_eq!(steer_toward(HEAD, (11.0, 18.0)), Some(Direction::Down));
        assert_eq!(steer_toward(HEAD, (9.0, 0.0)), Some(Direction::Up));
    }

    #[test]
    fn test_tie_goes_vertical() {
        assert_eq!(steer_toward(HEAD, (13.0, 13.0)), Some(Direction::Down));
        assert_eq!(steer_toward(HEAD, (7.0, 7.0)), Some(Direction::Up));
    }

    #[test]
    fn test_on_anchor_requests_nothing() {
        assert_eq!(steer_toward(HEAD, (10.0, 10.0)), None);
    }
}
