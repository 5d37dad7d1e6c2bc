//! OpenRouter gateway adapter
//!
//! Implements [`LlmGateway`] against the OpenRouter chat completions API.
//! One stateless HTTP request per completion; the client carries the
//! per-call timeout, so an expired call surfaces as [`GatewayError::Timeout`]
//! without blocking sibling requests.

use super::types::{ChatCompletionRequest, ChatCompletionResponse, WireMessage};
use async_trait::async_trait;
use council_application::ports::llm_gateway::{GatewayError, LlmGateway};
use council_domain::{Message, Model};
use reqwest::StatusCode;
use std::time::Duration;
use tracing::debug;

/// Default OpenRouter endpoint
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Gateway over the OpenRouter HTTP API
pub struct OpenRouterGateway {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl OpenRouterGateway {
    /// Create a gateway with the given credentials and per-call timeout
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    fn map_transport_error(e: reqwest::Error) -> GatewayError {
        if e.is_timeout() {
            GatewayError::Timeout
        } else if e.is_connect() {
            GatewayError::ConnectionError(e.to_string())
        } else {
            GatewayError::RequestFailed(e.to_string())
        }
    }
}

#[async_trait]
impl LlmGateway for OpenRouterGateway {
    async fn complete(&self, model: &Model, messages: &[Message]) -> Result<String, GatewayError> {
        let request = ChatCompletionRequest {
            model: model.as_str(),
            messages: messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.as_str(),
                    content: &m.content,
                })
                .collect(),
        };

        debug!(model = %model, messages = messages.len(), "Sending completion request");

        let response = self
            .client
            .post(&self.base_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(Self::map_transport_error)?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::QuotaExhausted(truncate(&body, 300)));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(GatewayError::ModelNotAvailable(model.to_string()));
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GatewayError::RequestFailed(format!(
                "HTTP {}: {}",
                status.as_u16(),
                truncate(&body, 300)
            )));
        }

        let body: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::MalformedResponse(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| {
                GatewayError::MalformedResponse("response contained no assistant content".into())
            })
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gateway_construction() {
        let gateway =
            OpenRouterGateway::new("sk-test", OPENROUTER_API_URL, Duration::from_secs(30));
        assert!(gateway.is_ok());
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("abcdef", 3), "abc");
        assert_eq!(truncate("กขค", 2), "กข");
        assert_eq!(truncate("ab", 10), "ab");
    }
}
