//! Noughts - tic-tac-toe against an LLM opponent
//!
//! Terminal client: the human plays X, the configured model plays O.

#![warn(missing_docs)]

use anyhow::Result;
use clap::Parser;
use noughts::{Cli, GameConfig, GameSession, LlmClient, MoveOracle};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let mut config = GameConfig::load_or_default(&cli.config)?;
    if let Some(provider) = cli.provider {
        config = config.with_provider(provider);
    }
    if let Some(model) = cli.model {
        config = config.with_model(model);
    }

    let client = LlmClient::new(config.create_llm_config()?);
    let session = GameSession::new(MoveOracle::new(Box::new(client)));

    noughts::run(session, &cli.log_file).await
}
