//! Wire types for the OpenRouter chat completions API

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/v1/chat/completions`
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<WireMessage<'a>>,
}

/// One chat message on the wire
#[derive(Debug, Serialize)]
pub struct WireMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Response body for a chat completion
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_to_openrouter_shape() {
        let request = ChatCompletionRequest {
            model: "openai/gpt-5.1",
            messages: vec![
                WireMessage {
                    role: "system",
                    content: "grounding",
                },
                WireMessage {
                    role: "user",
                    content: "question",
                },
            ],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], "openai/gpt-5.1");
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "question");
    }

    #[test]
    fn test_response_deserializes_choices() {
        let body = r#"{
            "id": "gen-123",
            "choices": [{"message": {"role": "assistant", "content": "answer text"}}]
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(body).unwrap();
        assert_eq!(
            response.choices[0].message.content.as_deref(),
            Some("answer text")
        );
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        assert!(response.choices.is_empty());

        let response: ChatCompletionResponse =
            serde_json::from_str(r#"{"choices": [{"message": {}}]}"#).unwrap();
        assert!(response.choices[0].message.content.is_none());
    }
}
