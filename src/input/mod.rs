//! Keyboard, button and pointer input

pub mod buttons;
pub mod handler;
pub mod pointer;

pub use buttons::ControlButton;
pub use handler::{InputHandler, KeyAction};
pub use pointer::steer_toward;
