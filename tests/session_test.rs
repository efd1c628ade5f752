//! End-to-end tests for the game session: human turn, model turn,
//! fallback recovery, and game-over handling.

use noughts::{
    Completion, GameSession, GameStatus, LlmError, Mark, MoveOracle, Square, fallback_move,
};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Completion backend that replays scripted replies.
#[derive(Clone)]
struct ScriptedApi {
    inner: Arc<Script>,
}

struct Script {
    replies: Mutex<VecDeque<Result<String, String>>>,
    calls: AtomicUsize,
}

impl ScriptedApi {
    fn new(replies: Vec<Result<&str, &str>>) -> Self {
        let replies = replies
            .into_iter()
            .map(|r| r.map(str::to_string).map_err(str::to_string))
            .collect();
        Self {
            inner: Arc::new(Script {
                replies: Mutex::new(replies),
                calls: AtomicUsize::new(0),
            }),
        }
    }

    fn calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl Completion for ScriptedApi {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_message: &str,
    ) -> Result<String, LlmError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        match self.inner.replies.lock().unwrap().pop_front() {
            Some(Ok(reply)) => Ok(reply),
            Some(Err(message)) => Err(LlmError::new(message)),
            None => panic!("Scripted API ran out of replies"),
        }
    }
}

fn session_with(replies: Vec<Result<&str, &str>>) -> (GameSession, ScriptedApi) {
    let api = ScriptedApi::new(replies);
    let session = GameSession::new(MoveOracle::new(Box::new(api.clone())));
    (session, api)
}

fn reply(thinking: &str, cell: usize) -> String {
    format!(r#"{{"thinking": "{}", "move": {}}}"#, thinking, cell)
}

#[test]
fn test_new_session_starts_fresh() {
    let (session, api) = session_with(vec![]);
    assert_eq!(session.status(), GameStatus::InProgress);
    assert_eq!(session.board().first_empty(), Some(0));
    assert!(session.commentary().is_none());
    assert!(session.notice().is_none());
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn test_human_move_triggers_model_answer() {
    let scripted = reply("taking the corner", 0);
    let (mut session, api) = session_with(vec![Ok(scripted.as_str())]);

    session.play(4).await;

    assert_eq!(session.board().get(4), Some(Square::Occupied(Mark::X)));
    assert_eq!(session.board().get(0), Some(Square::Occupied(Mark::O)));
    assert_eq!(session.status(), GameStatus::InProgress);
    assert_eq!(session.commentary(), Some("taking the corner"));
    assert!(session.notice().is_none());
    assert_eq!(api.calls(), 1);
}

#[tokio::test]
async fn test_winning_human_move_skips_model() {
    let r1 = reply("bottom left", 3);
    let r2 = reply("center column", 4);
    let (mut session, api) = session_with(vec![Ok(r1.as_str()), Ok(r2.as_str())]);

    // X builds the top row while O answers 3 then 4
    session.play(0).await;
    session.play(1).await;
    session.play(2).await;

    assert_eq!(session.status(), GameStatus::Won(Mark::X));
    assert_eq!(session.board().get(2), Some(Square::Occupied(Mark::X)));
    // The winning move must not consult the model
    assert_eq!(api.calls(), 2);
}

#[tokio::test]
async fn test_transport_failure_plays_fallback() {
    let r1 = reply("corner defense", 8);
    let (mut session, api) = session_with(vec![Ok(r1.as_str()), Err("connection refused")]);

    session.play(0).await;
    assert_eq!(session.commentary(), Some("corner defense"));

    session.play(1).await;

    // Cells 0, 1 and 8 are taken, so the fallback is cell 2
    assert_eq!(session.board().get(2), Some(Square::Occupied(Mark::O)));
    assert_eq!(session.status(), GameStatus::InProgress);
    // Commentary still belongs to the last accepted reply
    assert_eq!(session.commentary(), Some("corner defense"));
    let notice = session.notice().expect("fallback should leave a notice");
    assert!(notice.contains("fallback"), "Notice was: {}", notice);
    assert_eq!(api.calls(), 2);
}

#[tokio::test]
async fn test_malformed_reply_plays_fallback() {
    let (mut session, _api) = session_with(vec![Ok("I'll take the center!")]);

    session.play(4).await;

    // First empty cell after X took 4
    assert_eq!(session.board().get(0), Some(Square::Occupied(Mark::O)));
    assert!(session.commentary().is_none());
    assert!(session.notice().is_some());
}

#[tokio::test]
async fn test_illegal_reply_plays_fallback() {
    // The model asks for the square the human just took
    let scripted = reply("I want the center", 4);
    let (mut session, api) = session_with(vec![Ok(scripted.as_str())]);

    session.play(4).await;

    assert_eq!(session.board().get(4), Some(Square::Occupied(Mark::X)));
    assert_eq!(session.board().get(0), Some(Square::Occupied(Mark::O)));
    assert!(session.commentary().is_none());
    assert!(session.notice().is_some());
    assert_eq!(api.calls(), 1);
}

#[tokio::test]
async fn test_successful_reply_clears_notice() {
    let r2 = reply("take two", 2);
    let (mut session, _api) = session_with(vec![Ok("garbage"), Ok(r2.as_str())]);

    session.play(4).await;
    assert!(session.notice().is_some());

    session.play(1).await;
    assert!(session.notice().is_none());
    assert_eq!(session.commentary(), Some("take two"));
}

#[tokio::test]
async fn test_invalid_human_input_is_ignored() {
    let scripted = reply("corner", 0);
    let (mut session, api) = session_with(vec![Ok(scripted.as_str())]);

    // Out of range: nothing happens, nobody is consulted
    session.play(9).await;
    assert_eq!(session.board(), &noughts::Board::new());
    assert_eq!(api.calls(), 0);

    session.play(4).await;
    assert_eq!(api.calls(), 1);

    // Occupied by X
    session.play(4).await;
    // Occupied by O
    session.play(0).await;
    assert_eq!(api.calls(), 1);
    assert_eq!(session.board().get(4), Some(Square::Occupied(Mark::X)));
    assert_eq!(session.board().get(0), Some(Square::Occupied(Mark::O)));
}

#[tokio::test]
async fn test_model_win_is_detected() {
    let r1 = reply("top left", 0);
    let r2 = reply("top center", 1);
    let r3 = reply("completing the row", 2);
    let (mut session, api) =
        session_with(vec![Ok(r1.as_str()), Ok(r2.as_str()), Ok(r3.as_str())]);

    // O builds the top row while X wanders
    session.play(4).await;
    session.play(5).await;
    session.play(8).await;

    assert_eq!(session.status(), GameStatus::Won(Mark::O));
    assert_eq!(session.commentary(), Some("completing the row"));
    assert_eq!(api.calls(), 3);
}

#[tokio::test]
async fn test_tie_is_detected() {
    // Final board:        X X O
    //                     O O X
    //                     X O X
    let r1 = reply("top right", 2);
    let r2 = reply("middle left", 3);
    let r3 = reply("center", 4);
    let r4 = reply("bottom center", 7);
    let (mut session, api) = session_with(vec![
        Ok(r1.as_str()),
        Ok(r2.as_str()),
        Ok(r3.as_str()),
        Ok(r4.as_str()),
    ]);

    session.play(0).await;
    session.play(1).await;
    session.play(5).await;
    session.play(6).await;
    session.play(8).await;

    assert_eq!(session.status(), GameStatus::Tie);
    // The board filled on the human's move, so the model sat out
    assert_eq!(api.calls(), 4);
    assert_eq!(session.board().first_empty(), None);
}

#[tokio::test]
async fn test_input_after_game_over_is_ignored() {
    let r1 = reply("low corner", 6);
    let r2 = reply("low center", 7);
    let (mut session, api) = session_with(vec![Ok(r1.as_str()), Ok(r2.as_str())]);

    session.play(0).await;
    session.play(1).await;
    session.play(2).await;
    assert_eq!(session.status(), GameStatus::Won(Mark::X));

    let frozen = session.board().clone();
    session.play(4).await;
    assert_eq!(session.board(), &frozen);
    assert_eq!(api.calls(), 2);
}

#[tokio::test]
async fn test_new_game_resets_everything() {
    let opening = reply("opening note", 0);
    let (mut session, _api) = session_with(vec![Ok(opening.as_str()), Ok("malformed")]);

    session.play(4).await;
    assert_eq!(session.commentary(), Some("opening note"));

    session.play(1).await;
    assert!(session.notice().is_some());
    assert_eq!(session.commentary(), Some("opening note"));
    assert!(session.board().first_empty() != Some(0));

    session.new_game();

    assert_eq!(session.status(), GameStatus::InProgress);
    assert_eq!(session.board(), &noughts::Board::new());
    assert!(session.commentary().is_none());
    assert!(session.notice().is_none());
}

#[tokio::test]
async fn test_fallback_skips_to_lowest_empty_cell() {
    // Leaves cells 3 and 7 as the only empties when the call fails
    let r1 = reply("top left", 0);
    let r2 = reply("top right", 2);
    let r3 = reply("center", 4);
    let (mut session, _api) = session_with(vec![
        Ok(r1.as_str()),
        Ok(r2.as_str()),
        Ok(r3.as_str()),
        Err("connection reset"),
    ]);

    session.play(1).await;
    session.play(5).await;
    session.play(6).await;
    session.play(8).await;

    // Of the empties {3, 7}, the fallback must take 3
    assert_eq!(session.board().get(3), Some(Square::Occupied(Mark::O)));
    assert!(session.board().is_empty(7));
    assert_eq!(session.status(), GameStatus::InProgress);
    assert!(session.notice().is_some());
}

#[test]
fn test_fallback_move_is_first_empty() {
    let mut board = noughts::Board::new();
    assert_eq!(fallback_move(&board), Some(0));

    board.apply(0, Mark::X).unwrap();
    board.apply(1, Mark::O).unwrap();
    assert_eq!(fallback_move(&board), Some(2));

    // Single empty cell left at 7
    for cell in 2..9 {
        if cell != 7 {
            board.apply(cell, Mark::X).unwrap();
        }
    }
    assert_eq!(fallback_move(&board), Some(7));

    board.apply(7, Mark::O).unwrap();
    assert_eq!(fallback_move(&board), None);
}
