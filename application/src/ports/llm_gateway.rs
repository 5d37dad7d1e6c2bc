//! LLM Gateway port
//!
//! Defines the interface for communicating with model inference providers.

use async_trait::async_trait;
use council_domain::{Message, Model};
use thiserror::Error;

/// Errors that can occur during gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Quota exhausted: {0}")]
    QuotaExhausted(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Timeout")]
    Timeout,
}

/// Gateway for model inference
///
/// This port defines how the application layer talks to LLM providers.
/// Every stage uses the same contract: a full message list in, the
/// assistant's text out. Implementations (adapters) live in the
/// infrastructure layer and carry their own per-call timeout.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send a chat completion request and return the assistant text
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError>;
}
