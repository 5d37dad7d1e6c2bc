//! Inference gateway configuration from TOML (`[gateway]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Gateway configuration from TOML
///
/// The API key may also come from the `OPENROUTER_API_KEY` environment
/// variable; the file value wins when both are set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileGatewayConfig {
    /// OpenRouter API key
    pub api_key: Option<String>,
    /// Chat completions endpoint
    pub base_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
}

impl Default for FileGatewayConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://openrouter.ai/api/v1/chat/completions".to_string(),
            timeout_secs: 120,
        }
    }
}

impl FileGatewayConfig {
    /// Resolve the API key from config or environment
    pub fn resolve_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| {
                std::env::var("OPENROUTER_API_KEY")
                    .ok()
                    .filter(|key| !key.trim().is_empty())
            })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = FileGatewayConfig::default();
        assert!(config.base_url.contains("openrouter.ai"));
        assert_eq!(config.timeout(), Duration::from_secs(120));
    }

    #[test]
    fn test_file_key_wins() {
        let config = FileGatewayConfig {
            api_key: Some("sk-from-file".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_api_key().as_deref(), Some("sk-from-file"));
    }

    #[test]
    fn test_blank_key_treated_as_absent() {
        let config = FileGatewayConfig {
            api_key: Some("   ".to_string()),
            ..Default::default()
        };
        // Falls through to the environment, which may or may not be set;
        // either way the blank file value must not be returned
        assert_ne!(config.resolve_api_key().as_deref(), Some("   "));
    }
}
