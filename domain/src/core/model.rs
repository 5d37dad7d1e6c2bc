//! Model value object representing an LLM council member

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Available LLM models (Value Object)
///
/// Identifiers follow the OpenRouter naming scheme (`vendor/model`).
/// Unknown identifiers are preserved as [`Model::Custom`] so the roster can
/// be extended from configuration without a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Model {
    Gpt51,
    Gemini3Pro,
    ClaudeSonnet45,
    Grok4,
    Custom(String),
}

impl Model {
    /// Get the string identifier for this model
    pub fn as_str(&self) -> &str {
        match self {
            Model::Gpt51 => "openai/gpt-5.1",
            Model::Gemini3Pro => "google/gemini-3-pro-preview",
            Model::ClaudeSonnet45 => "anthropic/claude-sonnet-4.5",
            Model::Grok4 => "x-ai/grok-4",
            Model::Custom(s) => s,
        }
    }

    /// The default council members, in roster order
    pub fn default_members() -> Vec<Model> {
        vec![
            Model::Gpt51,
            Model::Gemini3Pro,
            Model::ClaudeSonnet45,
            Model::Grok4,
        ]
    }

    /// The default chairman model
    pub fn default_chairman() -> Model {
        Model::Gemini3Pro
    }

    /// Vendor prefix of the identifier (e.g. "openai")
    pub fn vendor(&self) -> &str {
        self.as_str().split('/').next().unwrap_or(self.as_str())
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "openai/gpt-5.1" => Model::Gpt51,
            "google/gemini-3-pro-preview" => Model::Gemini3Pro,
            "anthropic/claude-sonnet-4.5" => Model::ClaudeSonnet45,
            "x-ai/grok-4" => Model::Grok4,
            other => Model::Custom(other.to_string()),
        })
    }
}

impl Serialize for Model {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Model {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(s.parse().unwrap())
    }
}
