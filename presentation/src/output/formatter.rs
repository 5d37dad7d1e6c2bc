//! Output formatter trait

use council_application::ChatOutcome;

/// Trait for formatting deliberation outcomes
pub trait OutputFormatter {
    /// Format the full outcome: answer, consensus ranking, and citations
    fn format(&self, question: &str, outcome: &ChatOutcome) -> String;

    /// Format as JSON
    fn format_json(&self, outcome: &ChatOutcome) -> String;

    /// Format the answer only (concise output)
    fn format_answer_only(&self, outcome: &ChatOutcome) -> String;
}
