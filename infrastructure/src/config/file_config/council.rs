//! Council roster configuration from TOML (`[council]` section)

use council_domain::{CouncilRoster, Model};
use serde::{Deserialize, Serialize};

/// Council roster configuration from TOML
///
/// # Example
///
/// ```toml
/// [council]
/// members = [
///     "openai/gpt-5.1",
///     "google/gemini-3-pro-preview",
///     "anthropic/claude-sonnet-4.5",
///     "x-ai/grok-4",
/// ]
/// chairman = "google/gemini-3-pro-preview"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileCouncilConfig {
    /// Council members, in roster order
    pub members: Vec<String>,
    /// Chairman model for Stage 3 synthesis (may also be a member)
    pub chairman: Option<String>,
}

impl Default for FileCouncilConfig {
    fn default() -> Self {
        Self {
            members: Model::default_members()
                .iter()
                .map(Model::to_string)
                .collect(),
            chairman: None,
        }
    }
}

impl FileCouncilConfig {
    /// Build the roster, falling back to the default chairman when none is
    /// configured
    pub fn to_roster(&self) -> CouncilRoster {
        let members: Vec<Model> = self
            .members
            .iter()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse().unwrap())
            .collect();

        let chairman = self
            .chairman
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse().unwrap())
            .unwrap_or_else(Model::default_chairman);

        CouncilRoster::new(members, chairman)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_roster() {
        let config = FileCouncilConfig::default();
        let roster = config.to_roster();
        assert_eq!(roster.members.len(), 4);
        assert_eq!(roster.chairman, Model::default_chairman());
    }

    #[test]
    fn test_explicit_chairman() {
        let config = FileCouncilConfig {
            members: vec!["openai/gpt-5.1".to_string()],
            chairman: Some("x-ai/grok-4".to_string()),
        };
        let roster = config.to_roster();
        assert_eq!(roster.members, vec![Model::Gpt51]);
        assert_eq!(roster.chairman, Model::Grok4);
    }
}
