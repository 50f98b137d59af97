//! Food placement.
//!
//! Positions are drawn uniformly over the whole grid and redrawn while they
//! land on the snake. This terminates almost surely, but a snake that nearly
//! fills the board makes the expected number of draws grow without bound,
//! and a snake covering every cell never terminates.

use rand::Rng;

use super::state::{Position, Snake};

/// Pick a uniformly random cell in `width x height` not covered by `snake`
pub fn spawn_food<R: Rng + ?Sized>(
    rng: &mut R,
    width: usize,
    height: usize,
    snake: &Snake,
) -> Position {
    loop {
        let x = rng.gen_range(0..width) as i32;
        let y = rng.gen_range(0..height) as i32;
        let pos = Position::new(x, y);

        if !snake.collides_with_body(pos) {
            return pos;
        }
    }
}
