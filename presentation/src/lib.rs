//! Presentation layer for law-council
//!
//! Console progress display, output formatting, CLI argument definitions,
//! and the interactive chat REPL.

pub mod chat;
pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::ChatRepl;
pub use cli::{Cli, OutputFormat};
pub use output::{ConsoleFormatter, OutputFormatter};
pub use progress::{ProgressReporter, SimpleProgress};
