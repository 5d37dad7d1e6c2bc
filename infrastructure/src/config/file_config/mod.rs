//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! Every section and field has a default, so a missing or partial file is
//! always valid input.

mod council;
mod gateway;
mod retrieval;
mod storage;

pub use council::FileCouncilConfig;
pub use gateway::FileGatewayConfig;
pub use retrieval::{
    FileLocalCorpusConfig, FileMySqlConfig, FileNotionConfig, FileRetrievalConfig,
};
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation failures
#[derive(Error, Debug)]
pub enum ConfigValidationError {
    #[error("council.members cannot be empty")]
    NoMembers,

    #[error("council: model name cannot be empty")]
    EmptyModelName,

    #[error("retrieval.backend: unknown value '{0}' (expected \"mysql\" or \"local\")")]
    UnknownBackend(String),
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Council roster
    pub council: FileCouncilConfig,
    /// Inference gateway settings
    pub gateway: FileGatewayConfig,
    /// Document retrieval settings
    pub retrieval: FileRetrievalConfig,
    /// Conversation storage settings
    pub storage: FileStorageConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.council.members.is_empty() {
            return Err(ConfigValidationError::NoMembers);
        }
        if self.council.members.iter().any(|m| m.trim().is_empty()) {
            return Err(ConfigValidationError::EmptyModelName);
        }
        if let Some(chairman) = &self.council.chairman {
            if chairman.trim().is_empty() {
                return Err(ConfigValidationError::EmptyModelName);
            }
        }
        match self.retrieval.backend.as_str() {
            "mysql" | "local" => {}
            other => return Err(ConfigValidationError::UnknownBackend(other.to_string())),
        }
        Ok(())
    }
}
