//! Game controller for one human-vs-model session.

use crate::game::{Board, GameStatus, Mark, evaluate};
use crate::oracle::MoveOracle;
use tracing::{debug, info, instrument, warn};

/// Deterministic stand-in move: the first empty cell in ascending
/// index order.
///
/// Whenever it is O's turn the game is not yet terminal, so an empty
/// cell exists.
pub fn fallback_move(board: &Board) -> Option<usize> {
    board.first_empty()
}

/// One game of tic-tac-toe against the model.
///
/// Owns the board, the status derived from it, and the model's latest
/// analysis. The human plays X; every accepted human move that leaves
/// the game in progress triggers one move request for O, with the
/// fallback move covering any failure. Turns are processed strictly
/// sequentially: `play` runs the whole exchange, network round-trip
/// included, before returning.
pub struct GameSession {
    board: Board,
    status: GameStatus,
    oracle: MoveOracle,
    commentary: Option<String>,
    notice: Option<String>,
}

impl GameSession {
    /// Creates a fresh session over the given oracle.
    #[instrument(skip(oracle))]
    pub fn new(oracle: MoveOracle) -> Self {
        info!("Creating game session");
        Self {
            board: Board::new(),
            status: GameStatus::InProgress,
            oracle,
            commentary: None,
            notice: None,
        }
    }

    /// The current board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The current game status.
    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// The model's analysis for its latest accepted move, if any.
    pub fn commentary(&self) -> Option<&str> {
        self.commentary.as_deref()
    }

    /// Description of the most recent oracle failure, if the latest
    /// model turn fell back.
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Whether a human move at `cell` would currently be accepted.
    pub fn can_play(&self, cell: usize) -> bool {
        self.status == GameStatus::InProgress && self.board.is_empty(cell)
    }

    /// Plays the human move at `cell`, then the model's answer.
    ///
    /// Input that is out of range, targets an occupied square, or
    /// arrives after the game ended is ignored without changing any
    /// state. Otherwise X is placed, and while the game is still in
    /// progress the oracle is consulted exactly once for O's move; on
    /// any oracle failure the fallback move is played instead and a
    /// notice is recorded, leaving the commentary unchanged.
    #[instrument(skip(self), fields(status = ?self.status))]
    pub async fn play(&mut self, cell: usize) {
        if self.status != GameStatus::InProgress {
            debug!(cell, "Ignoring input: game is over");
            return;
        }
        if let Err(reject) = self.board.apply(cell, Mark::X) {
            debug!(cell, %reject, "Ignoring input");
            return;
        }
        self.status = evaluate(&self.board);
        info!(cell, status = ?self.status, "Human played");

        if self.status != GameStatus::InProgress {
            return;
        }
        self.model_turn().await;
    }

    /// Resets to the initial state: empty board, in progress, no
    /// commentary or notice.
    #[instrument(skip(self))]
    pub fn new_game(&mut self) {
        info!("Starting new game");
        self.board.reset();
        self.status = GameStatus::InProgress;
        self.commentary = None;
        self.notice = None;
    }

    /// Obtains O's move from the oracle (or the fallback) and applies it.
    async fn model_turn(&mut self) {
        let cell = match self.oracle.request_move(&self.board).await {
            Ok(reply) => {
                self.commentary = Some(reply.thinking().to_string());
                self.notice = None;
                reply.cell()
            }
            Err(err) => {
                warn!(error = %err, "Move request failed, playing fallback");
                self.notice = Some(format!("Model error: {}. Played the fallback move.", err));
                match fallback_move(&self.board) {
                    Some(cell) => cell,
                    // The game is in progress here, so the board has an
                    // empty cell; this arm never runs.
                    None => return,
                }
            }
        };

        if let Err(reject) = self.board.apply(cell, Mark::O) {
            // Validated by the oracle or chosen from empty cells, so
            // rejection cannot happen.
            warn!(cell, %reject, "Model move rejected");
            return;
        }
        self.status = evaluate(&self.board);
        info!(cell, status = ?self.status, "Model played");
    }
}
