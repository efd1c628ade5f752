//! Core domain types for the board.

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

/// A mark on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    /// X, played by the human. Always moves first.
    X,
    /// O, played by the model.
    O,
}

impl Mark {
    /// Returns the opposing mark.
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }
}

impl std::fmt::Display for Mark {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a mark.
    Occupied(Mark),
}

impl std::fmt::Display for Square {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Square::Empty => write!(f, " "),
            Square::Occupied(mark) => write!(f, "{}", mark),
        }
    }
}

/// Rejection reasons for a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Error)]
pub enum PlaceError {
    /// Cell index is outside 0-8.
    #[display("cell index out of bounds (must be 0-8)")]
    OutOfBounds,
    /// Target square already holds a mark.
    #[display("square is already occupied")]
    Occupied,
}

/// 3x3 board, squares in row-major order (0-8).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given cell (0-8).
    pub fn get(&self, cell: usize) -> Option<Square> {
        self.squares.get(cell).copied()
    }

    /// Checks if a cell is on the board and empty.
    pub fn is_empty(&self, cell: usize) -> bool {
        matches!(self.get(cell), Some(Square::Empty))
    }

    /// Places a mark at the given cell.
    ///
    /// Rejects out-of-range cells and occupied squares without touching
    /// the board. Callers supply the correct mark; the board does not
    /// track whose turn it is.
    pub fn apply(&mut self, cell: usize, mark: Mark) -> Result<(), PlaceError> {
        match self.get(cell) {
            None => Err(PlaceError::OutOfBounds),
            Some(Square::Occupied(_)) => Err(PlaceError::Occupied),
            Some(Square::Empty) => {
                self.squares[cell] = Square::Occupied(mark);
                Ok(())
            }
        }
    }

    /// Clears every square.
    pub fn reset(&mut self) {
        self.squares = [Square::Empty; 9];
    }

    /// Returns the lowest-indexed empty cell, if any.
    pub fn first_empty(&self) -> Option<usize> {
        self.squares
            .iter()
            .position(|square| *square == Square::Empty)
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Pipe-delimited cell tokens, e.g. ` |X| | |O| | | | `.
///
/// This is the board text the model sees, so the format tracks the
/// prompt's description of it.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (cell, square) in self.squares.iter().enumerate() {
            if cell > 0 {
                write!(f, "|")?;
            }
            write!(f, "{}", square)?;
        }
        Ok(())
    }
}

/// Current status of the game, derived from the board by the rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Game is ongoing.
    InProgress,
    /// Three in a row for the given mark.
    Won(Mark),
    /// Board is full with no winner.
    Tie,
}
