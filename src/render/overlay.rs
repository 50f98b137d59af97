//! Message overlay shown on top of the board

/// What an overlay button does when activated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayCommand {
    /// Return to a fresh, idle game
    Reset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverlayAction {
    pub label: String,
    pub command: OverlayCommand,
}

impl OverlayAction {
    pub fn new(label: impl Into<String>, command: OverlayCommand) -> Self {
        Self {
            label: label.into(),
            command,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub text: String,
    pub action: Option<OverlayAction>,
}

/// At most one message is visible; showing a new one replaces it
#[derive(Debug, Default)]
pub struct MessageOverlay {
    current: Option<Message>,
}

impl MessageOverlay {
    pub fn new() -> Self {
        Self { current: None }
    }

    pub fn show(&mut self, text: impl Into<String>, action: Option<OverlayAction>) {
        self.current = Some(Message {
            text: text.into(),
            action,
        });
    }

    pub fn hide(&mut self) {
        self.current = None;
    }

    pub fn message(&self) -> Option<&Message> {
        self.current.as_ref()
    }

    pub fn is_visible(&self) -> bool {
        self.current.is_some()
    }

    /// Hide the message and hand back its command, if it has one.
    /// A message without an action stays up.
    pub fn activate(&mut self) -> Option<OverlayCommand> {
        let command = self.current.as_ref()?.action.as_ref()?.command;
        self.current = None;
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_show_replaces_message() {
        let mut overlay = MessageOverlay::new();
        overlay.show("Paused", None);
        overlay.show(
            "Game over!",
            Some(OverlayAction::new("Play again", OverlayCommand::Reset)),
        );

        let message = overlay.message().unwrap();
        assert_eq!(message.text, "Game over!");
        assert_eq!(message.action.as_ref().unwrap().label, "Play again");
    }

    #[test]
    fn test_activate_runs_action_once() {
        let mut overlay = MessageOverlay::new();
        overlay.show(
            "Game over!",
            Some(OverlayAction::new("Play again", OverlayCommand::Reset)),
        );

        assert_eq!(overlay.activate(), Some(OverlayCommand::Reset));
        assert!(!overlay.is_visible());
        assert_eq!(overlay.activate(), None);
    }

    #[test]
    fn test_activate_without_action_keeps_message() {
        let mut overlay = MessageOverlay::new();
        overlay.show("Paused", None);

        assert_eq!(overlay.activate(), None);
        assert!(overlay.is_visible());

        overlay.hide();
        assert!(overlay.message().is_none());
    }
}
