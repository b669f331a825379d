use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error};

use super::{CompletionError, CompletionProvider, CompletionRequest};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "gpt-4o-mini";

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    response_format: ResponseFormat<'a>,
}

#[derive(Debug, Serialize)]
struct ResponseFormat<'a> {
    #[serde(rename = "type")]
    format_type: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

/// OpenAI-compatible chat-completions backend in structured-JSON mode.
pub struct OpenAiChatProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    model: String,
}

impl OpenAiChatProvider {
    pub fn new(
        api_key: String,
        endpoint: Option<String>,
        model: Option<String>,
        request_timeout_seconds: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(request_timeout_seconds))
            .build()?;

        let base_url = endpoint
            .filter(|e| !e.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let model = model
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Ok(Self {
            client,
            api_key,
            base_url,
            model,
        })
    }
}

#[async_trait]
impl CompletionProvider for OpenAiChatProvider {
    fn name(&self) -> &'static str {
        "OpenAI chat completions"
    }

    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<serde_json::Value, CompletionError> {
        let url = format!("{}/chat/completions", self.base_url);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system_instruction,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user_payload,
                },
            ],
            temperature: request.temperature,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        debug!("Sending completion request to {}", url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;

        if !status.is_success() {
            error!(
                "Completion request failed with status {}: {}",
                status, response_text
            );
            return Err(CompletionError::Api {
                status: status.as_u16(),
                body: response_text,
            });
        }

        let chat_response: ChatResponse = serde_json::from_str(&response_text)
            .map_err(|e| CompletionError::MalformedResponse(e.to_string()))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| {
                CompletionError::MalformedResponse("response contained no choices".to_string())
            })?;

        let value: serde_json::Value = serde_json::from_str(&content).map_err(|e| {
            CompletionError::MalformedResponse(format!("completion content was not JSON: {e}"))
        })?;

        debug!("Completion response parsed: {} bytes", content.len());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let provider =
            OpenAiChatProvider::new("sk-test".to_string(), None, None, 30).unwrap();
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_custom_endpoint_and_model() {
        let provider = OpenAiChatProvider::new(
            "sk-test".to_string(),
            Some("http://localhost:8080/v1".to_string()),
            Some("local-model".to_string()),
            30,
        )
        .unwrap();
        assert_eq!(provider.base_url, "http://localhost:8080/v1");
        assert_eq!(provider.model, "local-model");
    }

    #[test]
    fn test_empty_endpoint_falls_back_to_default() {
        let provider = OpenAiChatProvider::new(
            "sk-test".to_string(),
            Some(String::new()),
            Some(String::new()),
            30,
        )
        .unwrap();
        assert_eq!(provider.base_url, DEFAULT_BASE_URL);
        assert_eq!(provider.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_chat_request_serialization() {
        let body = ChatRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "system",
                content: "You are a test.",
            }],
            temperature: 0.3,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains("\"response_format\":{\"type\":\"json_object\"}"));
        assert!(json.contains("\"temperature\":0.3"));
    }
}
