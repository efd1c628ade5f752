//! Command-line interface for noughts.

use crate::llm_client::LlmProvider;
use clap::Parser;
use std::path::PathBuf;

/// Noughts - terminal tic-tac-toe against an LLM opponent
#[derive(Parser, Debug)]
#[command(name = "noughts")]
#[command(about = "Play tic-tac-toe against an LLM", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "noughts.toml")]
    pub config: PathBuf,

    /// Override the LLM provider (gemini, openai or anthropic)
    #[arg(long)]
    pub provider: Option<LlmProvider>,

    /// Override the model name
    #[arg(long)]
    pub model: Option<String>,

    /// File to write tracing output to (the terminal is taken over by
    /// the UI)
    #[arg(long, default_value = "noughts.log")]
    pub log_file: PathBuf,
}
