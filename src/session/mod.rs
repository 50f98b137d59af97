pub mod game_loop;
pub mod ticker;

pub use game_loop::{GameLoop, LoopPhase};
pub use ticker::Ticker;
