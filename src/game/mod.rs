mod rules;
mod types;

pub use rules::{WINNING_LINES, evaluate, winner};
pub use types::{Board, GameStatus, Mark, PlaceError, Square};
