//! CLI command definitions

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for deliberation results
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Full formatted output with ranking and citations
    Full,
    /// Only the final answer
    Answer,
    /// JSON output
    Json,
}

/// CLI arguments for law-council
#[derive(Parser, Debug)]
#[command(name = "law-council")]
#[command(author, version, about = "Legal LLM council - grounded answers from a panel of models")]
#[command(long_about = r#"
law-council answers legal questions by consulting a council of LLMs over
retrieved legal documents.

Each question goes through three stages:
1. Expert Consultation: every council member answers in parallel, grounded
   in documents retrieved from the configured backends
2. Cross-Ranking: members rank each other's anonymized answers
3. Synthesis: a chairman model produces the single final answer

Configuration files are loaded from (in priority order):
1. COUNCIL_* environment variables
2. --config <path>      Explicit config file
3. ./council.toml       Project-level config
4. ~/.config/law-council/config.toml   Global config

Example:
  law-council "What are the notice requirements for terminating a lease?"
  law-council -m openai/gpt-5.1 -m x-ai/grok-4 "Who inherits without a will?"
  law-council --chat
"#)]
pub struct Cli {
    /// The legal question to deliberate (not required in chat mode)
    pub question: Option<String>,

    /// Start interactive chat mode
    #[arg(short, long)]
    pub chat: bool,

    /// Council members (can be specified multiple times)
    #[arg(short, long, value_name = "MODEL")]
    pub model: Vec<String>,

    /// Chairman model for final synthesis
    #[arg(long, value_name = "MODEL")]
    pub chairman: Option<String>,

    /// Session id for conversation continuity
    #[arg(long, value_name = "ID")]
    pub session: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "answer")]
    pub output: OutputFormat,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress progress indicators
    #[arg(short, long)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}
