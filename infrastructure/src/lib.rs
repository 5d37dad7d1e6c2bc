//! Infrastructure layer for law-council
//!
//! This crate contains adapters that implement the ports defined in the
//! application layer: the OpenRouter inference gateway, the document
//! retrieval backends, the JSONL conversation store, and configuration
//! loading.

pub mod config;
pub mod providers;
pub mod retrieval;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigLoader, ConfigValidationError, FileConfig, FileCouncilConfig, FileGatewayConfig,
    FileNotionConfig, FileRetrievalConfig, FileStorageConfig,
};
pub use providers::{OPENROUTER_API_URL, OpenRouterGateway};
pub use retrieval::{LocalCorpusSource, MySqlContextSource, MySqlParams, NotionSource};
pub use storage::JsonlConversationStore;
