//! Configuration loading

pub mod file_config;
pub mod loader;

pub use file_config::{
    ConfigValidationError, FileConfig, FileCouncilConfig, FileGatewayConfig, FileMySqlConfig,
    FileNotionConfig, FileRetrievalConfig, FileStorageConfig,
};
pub use loader::ConfigLoader;
