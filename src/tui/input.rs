//! Cursor movement for keyboard navigation.

use crossterm::event::KeyCode;

/// Moves a cursor cell (0-8, row-major) one step for an arrow key.
///
/// Steps that would leave the board return the cursor unchanged.
pub fn move_cursor(cursor: usize, key: KeyCode) -> usize {
    let row = cursor / 3;
    let col = cursor % 3;
    match key {
        KeyCode::Left if col > 0 => cursor - 1,
        KeyCode::Right if col < 2 => cursor + 1,
        KeyCode::Up if row > 0 => cursor - 3,
        KeyCode::Down if row < 2 => cursor + 3,
        _ => cursor,
    }
}
