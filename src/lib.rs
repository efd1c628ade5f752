//! Noughts library - tic-tac-toe against an LLM opponent
//!
//! A human plays X in a terminal UI; each reply move for O is chosen by a
//! text-completion model prompted with the serialized board. Malformed or
//! illegal model replies never stall the game: a deterministic fallback move
//! is played instead.
//!
//! # Architecture
//!
//! - **Game**: board representation and win/tie evaluation
//! - **Oracle**: board-to-prompt encoding and strict reply validation
//! - **Session**: one human-vs-model game loop with fallback recovery
//! - **Llm**: provider clients speaking the OpenAI and Anthropic protocols
//!
//! # Example
//!
//! ```no_run
//! use noughts::{GameConfig, GameSession, LlmClient, MoveOracle};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default();
//! let client = LlmClient::new(config.create_llm_config()?);
//! let mut session = GameSession::new(MoveOracle::new(Box::new(client)));
//!
//! // Human takes the center; the model answers as O.
//! session.play(4).await;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod game;
mod llm_client;
mod oracle;
mod session;
mod tui;

// Crate-level exports - CLI
pub use cli::Cli;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Game types
pub use game::{Board, GameStatus, Mark, PlaceError, Square, WINNING_LINES, evaluate, winner};

// Crate-level exports - LLM client
pub use llm_client::{Completion, LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Move oracle
pub use oracle::{MoveOracle, MoveReply, OracleError};

// Crate-level exports - Session management
pub use session::{GameSession, fallback_move};

// Crate-level exports - Terminal UI
pub use tui::run;
