//! Move selection through the model.
//!
//! Turns the current board into a chat-completion request and the
//! model's JSON reply into a validated move for O.

use crate::game::Board;
use crate::llm_client::{Completion, LlmError};
use derive_more::{Display, Error};
use serde::Deserialize;
use tracing::{debug, info, instrument, warn};

/// Role instruction sent with every move request.
///
/// The reply contract (JSON with `thinking` and `move`) is what
/// [`MoveOracle::request_move`] parses, so the two must stay in sync.
const SYSTEM_PROMPT: &str = "You are playing tic-tac-toe as O. The board is represented as a string with positions 0-8, separated by |.\n\
First, analyze 2-3 possible moves and explain your thinking for each. Then, make your final choice.\n\
Format your response as JSON with two fields:\n\
- \"thinking\": string explaining your analysis\n\
- \"move\": integer 0-8 representing your chosen move";

/// Reasons a move request can fail. All are recoverable; the caller
/// falls back to a deterministic move.
#[derive(Debug, Display, Error)]
pub enum OracleError {
    /// The completion call itself failed (network, timeout, non-success
    /// response).
    #[display("completion request failed: {source}")]
    Transport {
        /// Underlying client error.
        source: LlmError,
    },
    /// The reply was not the JSON object the prompt asked for.
    #[display("unparseable reply: {reason}")]
    Malformed {
        /// What the parser rejected.
        reason: String,
    },
    /// The reply parsed, but the chosen cell is out of range or already
    /// occupied.
    #[display("illegal move: {reason}")]
    Illegal {
        /// Which rule the move broke.
        reason: String,
    },
}

/// A validated move for O, with the model's accompanying analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveReply {
    thinking: String,
    cell: usize,
}

impl MoveReply {
    /// The model's free-text analysis.
    pub fn thinking(&self) -> &str {
        &self.thinking
    }

    /// The chosen cell (0-8, guaranteed empty at validation time).
    pub fn cell(&self) -> usize {
        self.cell
    }
}

/// Reply shape the prompt asks the model for.
///
/// `move` is kept as a plain integer so that out-of-range values reach
/// the range check instead of failing structurally.
#[derive(Debug, Deserialize)]
struct RawReply {
    thinking: String,
    #[serde(rename = "move")]
    cell: i64,
}

/// Requests O's next move from a completion backend and validates the
/// reply against the board.
pub struct MoveOracle {
    api: Box<dyn Completion>,
}

impl MoveOracle {
    /// Creates an oracle over the given completion backend.
    pub fn new(api: Box<dyn Completion>) -> Self {
        Self { api }
    }

    /// Asks the model for O's move on the given board.
    ///
    /// Issues exactly one completion request. The reply must be a JSON
    /// object with `thinking` and `move` fields (code fences are
    /// stripped first), and the move must target an empty cell in
    /// 0-8. Any failure is returned as an [`OracleError`]; no retry
    /// happens here.
    #[instrument(skip(self, board), fields(board = %board))]
    pub async fn request_move(&self, board: &Board) -> Result<MoveReply, OracleError> {
        let user_message = format!("Current board: {}\nWhat's your move?", board);

        debug!("Requesting move from model");
        let raw = self
            .api
            .complete(SYSTEM_PROMPT, &user_message)
            .await
            .map_err(|source| {
                warn!(error = %source, "Completion request failed");
                OracleError::Transport { source }
            })?;

        debug!(reply_length = raw.len(), "Parsing model reply");
        let reply = parse_reply(&raw)?;

        let cell = validate_cell(reply.cell, board)?;

        info!(cell, "Model chose a move");
        Ok(MoveReply {
            thinking: reply.thinking,
            cell,
        })
    }
}

/// Parses the reply text into the expected JSON shape.
fn parse_reply(raw: &str) -> Result<RawReply, OracleError> {
    let cleaned = strip_code_fences(raw);
    serde_json::from_str(&cleaned).map_err(|e| {
        warn!(error = %e, "Model reply did not parse");
        OracleError::Malformed {
            reason: e.to_string(),
        }
    })
}

/// Checks the chosen cell against range and occupancy.
fn validate_cell(cell: i64, board: &Board) -> Result<usize, OracleError> {
    if !(0..=8).contains(&cell) {
        warn!(cell, "Model chose an out-of-range cell");
        return Err(OracleError::Illegal {
            reason: format!("cell {} is out of range", cell),
        });
    }
    let cell = cell as usize;
    if !board.is_empty(cell) {
        warn!(cell, "Model chose an occupied cell");
        return Err(OracleError::Illegal {
            reason: format!("cell {} is already occupied", cell),
        });
    }
    Ok(cell)
}

/// Removes code-fence markup some models wrap JSON in.
fn strip_code_fences(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Mark;

    #[test]
    fn test_strip_code_fences() {
        let fenced = "```json\n{\"move\": 4}\n```";
        assert_eq!(strip_code_fences(fenced), "{\"move\": 4}");

        let bare = "{\"move\": 4}";
        assert_eq!(strip_code_fences(bare), "{\"move\": 4}");
    }

    #[test]
    fn test_parse_reply_accepts_expected_shape() {
        let reply = parse_reply(r#"{"thinking": "center is strong", "move": 4}"#).unwrap();
        assert_eq!(reply.thinking, "center is strong");
        assert_eq!(reply.cell, 4);
    }

    #[test]
    fn test_parse_reply_rejects_missing_fields() {
        assert!(matches!(
            parse_reply(r#"{"move": 4}"#),
            Err(OracleError::Malformed { .. })
        ));
        assert!(matches!(
            parse_reply(r#"{"thinking": "hmm"}"#),
            Err(OracleError::Malformed { .. })
        ));
    }

    #[test]
    fn test_parse_reply_rejects_non_integer_move() {
        assert!(matches!(
            parse_reply(r#"{"thinking": "hmm", "move": "four"}"#),
            Err(OracleError::Malformed { .. })
        ));
    }

    #[test]
    fn test_validate_cell_range() {
        let board = Board::new();
        assert_eq!(validate_cell(0, &board).unwrap(), 0);
        assert_eq!(validate_cell(8, &board).unwrap(), 8);
        assert!(matches!(
            validate_cell(9, &board),
            Err(OracleError::Illegal { .. })
        ));
        assert!(matches!(
            validate_cell(-1, &board),
            Err(OracleError::Illegal { .. })
        ));
    }

    #[test]
    fn test_validate_cell_occupancy() {
        let mut board = Board::new();
        board.apply(4, Mark::X).unwrap();
        assert!(matches!(
            validate_cell(4, &board),
            Err(OracleError::Illegal { .. })
        ));
        assert_eq!(validate_cell(3, &board).unwrap(), 3);
    }
}
