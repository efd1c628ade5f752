//! Win and tie detection.

use super::types::{Board, GameStatus, Mark, Square};
use tracing::instrument;

/// The 8 winning lines, checked in this fixed order: rows, columns,
/// diagonals. If two lines ever completed at once the first in this
/// order would name the winner, though alternating play cannot
/// produce that board.
pub const WINNING_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Returns the mark holding a complete line, if any.
#[instrument]
pub fn winner(board: &Board) -> Option<Mark> {
    for [a, b, c] in WINNING_LINES {
        if let Some(Square::Occupied(mark)) = board.get(a) {
            if board.get(b) == Some(Square::Occupied(mark))
                && board.get(c) == Some(Square::Occupied(mark))
            {
                return Some(mark);
            }
        }
    }
    None
}

/// Derives the game status from the board.
///
/// A complete line wins for its mark; a full board with no line is a
/// tie; anything else is still in progress.
#[instrument]
pub fn evaluate(board: &Board) -> GameStatus {
    if let Some(mark) = winner(board) {
        return GameStatus::Won(mark);
    }
    if board.first_empty().is_none() {
        return GameStatus::Tie;
    }
    GameStatus::InProgress
}
