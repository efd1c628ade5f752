//! Application state and logic.

use super::input;
use crossterm::event::KeyCode;

/// UI-side state: the cursor cell, whether the analysis panel is open, and
/// whether a model reply is in flight.
pub struct App {
    cursor: usize,
    show_analysis: bool,
    thinking: bool,
}

impl App {
    /// Creates the initial state with the cursor on the center cell.
    pub fn new() -> Self {
        Self {
            cursor: 4,
            show_analysis: true,
            thinking: false,
        }
    }

    /// Cell the cursor is on (0-8, row-major).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Moves the cursor one cell for an arrow key.
    pub fn move_cursor(&mut self, key: KeyCode) {
        self.cursor = input::move_cursor(self.cursor, key);
    }

    /// Whether the analysis panel is open.
    pub fn show_analysis(&self) -> bool {
        self.show_analysis
    }

    /// Opens or closes the analysis panel.
    pub fn toggle_analysis(&mut self) {
        self.show_analysis = !self.show_analysis;
    }

    /// Whether a model reply is currently awaited.
    pub fn thinking(&self) -> bool {
        self.thinking
    }

    /// Marks the start or end of the model's turn.
    pub fn set_thinking(&mut self, thinking: bool) {
        self.thinking = thinking;
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
