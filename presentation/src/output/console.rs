//! Console output formatter for deliberation outcomes

use crate::output::formatter::OutputFormatter;
use colored::Colorize;
use council_application::ChatOutcome;

/// Formats deliberation outcomes for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the full outcome
    pub fn format(question: &str, outcome: &ChatOutcome) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Legal Council Answer"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Question:".cyan().bold(), question));

        output.push_str(&format!(
            "{} {}\n",
            "Council:".cyan().bold(),
            outcome
                .metadata
                .models_used
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        ));
        output.push_str(&format!(
            "{} {}\n",
            "Chairman:".cyan().bold(),
            outcome.metadata.chairman
        ));

        if !outcome.metadata.aggregate_rankings.is_empty() {
            output.push_str(&Self::section_header("Consensus Ranking"));
            for (i, entry) in outcome.metadata.aggregate_rankings.iter().enumerate() {
                output.push_str(&format!(
                    "  {}. {} ({} pts)\n",
                    i + 1,
                    entry.model,
                    entry.score
                ));
            }
        }

        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&format!("\n{}\n", outcome.answer));

        if !outcome.sources.is_empty() {
            output.push_str(&Self::section_header("Sources"));
            for citation in &outcome.sources {
                output.push_str(&format!(
                    "  {} {}\n",
                    "*".yellow(),
                    citation.source.bold()
                ));
                if !citation.excerpt.is_empty() {
                    output.push_str(&format!("    {}\n", citation.excerpt.dimmed()));
                }
            }
        }

        output.push_str(&Self::footer());

        output
    }

    /// Format as JSON
    pub fn format_json(outcome: &ChatOutcome) -> String {
        serde_json::to_string_pretty(outcome).unwrap_or_else(|_| "{}".to_string())
    }

    /// Format the answer only (concise output)
    pub fn format_answer_only(outcome: &ChatOutcome) -> String {
        let mut output = String::new();

        output.push_str(&outcome.answer);
        output.push('\n');

        if !outcome.sources.is_empty() {
            output.push_str(&format!("\n{}\n", "Sources:".dimmed()));
            for citation in &outcome.sources {
                output.push_str(&format!("  - {}\n", citation.source));
            }
        }

        output
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format(&self, question: &str, outcome: &ChatOutcome) -> String {
        Self::format(question, outcome)
    }

    fn format_json(&self, outcome: &ChatOutcome) -> String {
        Self::format_json(outcome)
    }

    fn format_answer_only(&self, outcome: &ChatOutcome) -> String {
        Self::format_answer_only(outcome)
    }
}
