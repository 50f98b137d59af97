//! Screen geometry shared by drawing and mouse hit-testing

use ratatui::layout::{Constraint, Flex, Layout, Margin, Position as Cell, Rect};

use super::overlay::Message;
use crate::input::ControlButton;

/// Terminal columns per board cell
pub const CELL_WIDTH: u16 = 2;
const BUTTON_WIDTH: u16 = 8;
const BUTTON_HEIGHT: u16 = 3;

/// Where something on screen was clicked
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerTarget {
    Button(ControlButton),
    /// The action line of the message popup
    OverlayAction,
    /// Anywhere else inside the message popup
    Overlay,
    /// A point on the board in grid units
    Board { x: f32, y: f32 },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ScreenLayout {
    pub header: Rect,
    /// Board including its border
    pub board: Rect,
    /// Playing surface inside the border
    pub board_inner: Rect,
    pub buttons: Vec<(ControlButton, Rect)>,
    pub footer: Rect,
    /// Message popup, when one is drawn
    pub overlay: Option<Rect>,
    pub overlay_action: Option<Rect>,
}

impl ScreenLayout {
    pub fn compute(area: Rect, grid_width: usize, grid_height: usize) -> Self {
        let [header, body, footer] = Layout::vertical([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let grid_width = u16::try_from(grid_width).unwrap_or(u16::MAX);
        let grid_height = u16::try_from(grid_height).unwrap_or(u16::MAX);
        let board_width = grid_width.saturating_mul(CELL_WIDTH).saturating_add(2);
        let board_height = grid_height.saturating_add(2);

        let [board_row, button_row] = Layout::vertical([
            Constraint::Length(board_height),
            Constraint::Length(BUTTON_HEIGHT),
        ])
        .flex(Flex::Center)
        .areas(body);

        let [board] = Layout::horizontal([Constraint::Length(board_width)])
            .flex(Flex::Center)
            .areas(board_row);

        let button_areas: [Rect; 7] =
            Layout::horizontal([Constraint::Length(BUTTON_WIDTH); 7])
                .flex(Flex::Center)
                .spacing(1)
                .areas(button_row);

        Self {
            header,
            board,
            board_inner: board.inner(Margin::new(1, 1)),
            buttons: ControlButton::ALL.into_iter().zip(button_areas).collect(),
            footer,
            overlay: None,
            overlay_action: None,
        }
    }

    /// Reserve a box for `message` centered on the board and return it
    pub fn place_overlay(&mut self, message: &Message) -> Rect {
        let label_width = message
            .action
            .as_ref()
            .map_or(0, |action| action.label.chars().count() + 8);
        let width = (message.text.chars().count().max(label_width) as u16).saturating_add(6);
        let height = if message.action.is_some() { 6 } else { 4 };

        let [row] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(self.board);
        let [area] = Layout::horizontal([Constraint::Length(width)])
            .flex(Flex::Center)
            .areas(row);

        // Border, blank, text, blank, then the action line
        self.overlay_action = message.action.as_ref().map(|_| {
            let inner = area.inner(Margin::new(1, 1));
            Rect::new(inner.x, inner.y + 3, inner.width, 1)
        });
        self.overlay = Some(area);
        area
    }

    /// Top-left terminal cell of grid cell `(x, y)`, if it is on screen
    pub fn cell_origin(&self, x: i32, y: i32) -> Option<Cell> {
        let column = self.board_inner.x as i32 + x * CELL_WIDTH as i32;
        let row = self.board_inner.y as i32 + y;
        let cell = Cell::new(u16::try_from(column).ok()?, u16::try_from(row).ok()?);
        self.board_inner.contains(cell).then_some(cell)
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<PointerTarget> {
        let cell = Cell::new(column, row);

        if self.overlay.is_some_and(|rect| rect.contains(cell)) {
            let on_action = self
                .overlay_action
                .is_some_and(|action| action.contains(cell));
            return Some(if on_action {
                PointerTarget::OverlayAction
            } else {
                PointerTarget::Overlay
            });
        }

        if let Some((button, _)) = self.buttons.iter().find(|(_, rect)| rect.contains(cell)) {
            return Some(PointerTarget::Button(*button));
        }

        if self.board_inner.contains(cell) {
            return Some(PointerTarget::Board {
                x: (column - self.board_inner.x) as f32 / CELL_WIDTH as f32,
                y: (row - self.board_inner.y) as f32,
            });
        }

        None
    }
}
