//! REPL (Read-Eval-Print Loop) for interactive legal consultations
//!
//! All questions in one REPL run share a session id, so the conversation
//! store accumulates a single append-only transcript per sitting.

use crate::ConsoleFormatter;
use crate::ProgressReporter;
use colored::Colorize;
use council_application::{DeliberateUseCase, LlmGateway, NoProgress};
use council_domain::CouncilRoster;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};

/// Interactive chat REPL
pub struct ChatRepl<G: LlmGateway + 'static> {
    use_case: DeliberateUseCase<G>,
    roster: CouncilRoster,
    session_id: Option<String>,
    show_progress: bool,
}

impl<G: LlmGateway + 'static> ChatRepl<G> {
    pub fn new(use_case: DeliberateUseCase<G>, roster: CouncilRoster) -> Self {
        Self {
            use_case,
            roster,
            session_id: None,
            show_progress: true,
        }
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Resume an existing session instead of starting a fresh one
    pub fn with_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    /// Run the interactive REPL
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = dirs::data_dir().map(|p| p.join("law-council").join("history.txt"));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let readline = rl.readline(">>> ");

            match readline {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_question(line).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    async fn process_question(&mut self, question: &str) {
        let result = if self.show_progress {
            let progress = ProgressReporter::new();
            self.use_case
                .run(question, self.session_id.clone(), &progress)
                .await
        } else {
            self.use_case
                .run(question, self.session_id.clone(), &NoProgress)
                .await
        };

        match result {
            Ok(outcome) => {
                self.session_id = Some(outcome.session_id.clone());
                println!();
                println!("{}", ConsoleFormatter::format_answer_only(&outcome));
            }
            Err(e) => {
                eprintln!("{} {}", "Deliberation failed:".red().bold(), e);
            }
        }
    }

    fn print_welcome(&self) {
        println!();
        println!("+---------------------------------------------+");
        println!("|         law-council - Chat Mode             |");
        println!("+---------------------------------------------+");
        println!();
        println!(
            "Council: {}",
            self.roster
                .members
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!("Chairman: {}", self.roster.chairman);
        println!();
        println!("Commands:");
        println!("  /help     - Show this help");
        println!("  /council  - Show the current council");
        println!("  /session  - Show the current session id");
        println!("  /quit     - Exit chat");
        println!();
    }

    /// Handle slash commands. Returns true if should exit.
    fn handle_command(&self, cmd: &str) -> bool {
        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                true
            }
            "/help" | "/h" | "/?" => {
                println!();
                println!("Commands:");
                println!("  /help, /h, /?    - Show this help");
                println!("  /council         - Show the current council");
                println!("  /session         - Show the current session id");
                println!("  /quit, /exit, /q - Exit chat");
                println!();
                false
            }
            "/council" => {
                println!();
                println!("Council members:");
                for model in &self.roster.members {
                    println!("  - {}", model);
                }
                println!("Chairman: {}", self.roster.chairman);
                println!();
                false
            }
            "/session" => {
                match &self.session_id {
                    Some(id) => println!("Session: {}", id),
                    None => println!("No session yet - ask a question first"),
                }
                false
            }
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                false
            }
        }
    }
}
