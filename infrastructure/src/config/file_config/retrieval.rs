//! Retrieval configuration from TOML (`[retrieval]` section)

use crate::retrieval::lexical_db::MySqlParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retrieval configuration from TOML
///
/// # Example
///
/// ```toml
/// [retrieval]
/// backend = "mysql"          # or "local"
/// max_chunks = 10
///
/// [retrieval.mysql]
/// host = "localhost"
/// port = 3306
/// user = "vortex"
/// password = "secret"
/// database = "vortex"
///
/// [retrieval.local]
/// dir = "data/vortex"
///
/// [retrieval.notion]
/// enabled = true
/// api_key = "secret_..."
/// database_id = "abc123"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileRetrievalConfig {
    /// Primary backend: "mysql" or "local"
    pub backend: String,
    /// Maximum chunks requested from the primary backend
    pub max_chunks: usize,
    pub mysql: FileMySqlConfig,
    pub local: FileLocalCorpusConfig,
    pub notion: FileNotionConfig,
}

impl Default for FileRetrievalConfig {
    fn default() -> Self {
        Self {
            backend: "mysql".to_string(),
            max_chunks: 10,
            mysql: FileMySqlConfig::default(),
            local: FileLocalCorpusConfig::default(),
            notion: FileNotionConfig::default(),
        }
    }
}

/// `[retrieval.mysql]` - Vortex MySQL connection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileMySqlConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for FileMySqlConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            user: String::new(),
            password: String::new(),
            database: String::new(),
        }
    }
}

impl FileMySqlConfig {
    pub fn to_params(&self) -> MySqlParams {
        MySqlParams {
            host: self.host.clone(),
            port: self.port,
            user: self.user.clone(),
            password: self.password.clone(),
            database: self.database.clone(),
        }
    }
}

/// `[retrieval.local]` - local JSON corpus location
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLocalCorpusConfig {
    pub dir: String,
}

impl Default for FileLocalCorpusConfig {
    fn default() -> Self {
        Self {
            dir: "data/vortex".to_string(),
        }
    }
}

/// `[retrieval.notion]` - optional supplementary Notion source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FileNotionConfig {
    pub enabled: bool,
    pub api_key: String,
    pub database_id: String,
    /// Independent timeout for the supplementary call, in seconds
    pub timeout_secs: u64,
}

impl Default for FileNotionConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            database_id: String::new(),
            timeout_secs: 15,
        }
    }
}

impl FileNotionConfig {
    /// Enabled and carrying the credentials it needs
    pub fn is_configured(&self) -> bool {
        self.enabled && !self.api_key.trim().is_empty() && !self.database_id.trim().is_empty()
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
        let config = FileRetrievalConfig::default();
        assert_eq!(config.backend, "mysql");
        assert_eq!(config.max_chunks, 10);
        assert!(!config.notion.enabled);
    }

    #[test]
    fn test_notion_needs_credentials() {
        let mut notion = FileNotionConfig {
            enabled: true,
            ..Default::default()
        };
        assert!(!notion.is_configured());

        notion.api_key = "secret".to_string();
        notion.database_id = "db".to_string();
        assert!(notion.is_configured());
    }
}
