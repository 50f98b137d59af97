//! On-screen control buttons, clickable with the mouse

use super::KeyAction;
use crate::game::Direction;
use crate::session::LoopPhase;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlButton {
    Start,
    Pause,
    Reset,
    Up,
    Down,
    Left,
    Right,
}

impl ControlButton {
    /// Left-to-right order on screen
    pub const ALL: [ControlButton; 7] = [
        ControlButton::Start,
        ControlButton::Pause,
        ControlButton::Reset,
        ControlButton::Left,
        ControlButton::Up,
        ControlButton::Down,
        ControlButton::Right,
    ];

    pub fn label(&self, phase: LoopPhase) -> &'static str {
        match self {
            ControlButton::Start => "Start",
            ControlButton::Pause if phase == LoopPhase::Paused => "Resume",
            ControlButton::Pause => "Pause",
            ControlButton::Reset => "Reset",
            ControlButton::Up => "↑",
            ControlButton::Down => "↓",
            ControlButton::Left => "←",
            ControlButton::Right => "→",
        }
    }

    /// Start only works on a fresh game; pause only while one is in progress
    pub fn is_enabled(&self, phase: LoopPhase) -> bool {
        match self {
            ControlButton::Start => phase == LoopPhase::Idle,
            ControlButton::Pause => matches!(phase, LoopPhase::Running | LoopPhase::Paused),
            _ => true,
        }
    }

    pub fn action(&self) -> KeyAction {
        match self {
            ControlButton::Start => KeyAction::Start,
            ControlButton::Pause => KeyAction::TogglePause,
            ControlButton::Reset => KeyAction::Restart,
            ControlButton::Up => KeyAction::Turn(Direction::Up),
            ControlButton::Down => KeyAction::Turn(Direction::Down),
            ControlButton::Left => KeyAction::Turn(Direction::Left),
            ControlButton::Right => KeyAction::Turn(Direction::Right),
        }
    }

    /// The action for a click, or `None` while disabled
    pub fn press(&self, phase: LoopPhase) -> KeyAction {
        if self.is_enabled(phase) {
            self.action()
        } else {
            KeyAction::None
        }
    }
}
