//! Terminal presentation: board, stats, buttons and message overlay

pub mod layout;
pub mod overlay;
pub mod renderer;

pub use layout::{PointerTarget, ScreenLayout};
pub use overlay::{MessageOverlay, OverlayAction, OverlayCommand};
pub use renderer::Renderer;
