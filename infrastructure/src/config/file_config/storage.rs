//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};

/// Conversation storage configuration from TOML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Directory for per-session conversation logs
    pub data_dir: String,
}

impl Default for FileStorageConfig {
    fn default() -> Self {
        Self {
            data_dir: "data/conversations".to_string(),
        }
    }
}
