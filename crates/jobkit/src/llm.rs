//! Language model client
//!
//! Flows talk to the model through the [`ChatModel`] trait. [`OpenAiClient`]
//! implements it against any OpenAI-compatible `chat/completions` endpoint,
//! which covers both OpenAI and Groq. Calls are never retried.

use crate::error::LlmError;
use crate::types::{Endpoint, ModelResponse, PromptRequest, Usage};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// A model that answers one prompt with one Markdown response
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier (for logging)
    fn name(&self) -> &str;

    /// Send a single request and return the model's answer
    async fn complete(&self, request: &PromptRequest) -> Result<ModelResponse, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Client for OpenAI-compatible chat completion APIs
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    endpoint: Endpoint,
}

impl OpenAiClient {
    /// Build a client for `endpoint`
    pub fn new(endpoint: Endpoint, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(LlmError::ClientBuildError)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Endpoint {
        &self.endpoint
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/chat/completions",
            self.endpoint.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    fn name(&self) -> &str {
        &self.endpoint.model
    }

    async fn complete(&self, request: &PromptRequest) -> Result<ModelResponse, LlmError> {
        let user = request.user_message();
        let body = ChatCompletionRequest {
            model: &self.endpoint.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: request.system.trim(),
                },
                ChatMessage {
                    role: "user",
                    content: &user,
                },
            ],
            temperature: request.temperature,
        };

        debug!(
            provider = %self.endpoint.provider,
            model = %self.endpoint.model,
            prompt_chars = user.len(),
            "Sending chat completion"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.endpoint.api_key)
            .json(&body)
            .send()
            .await
            .map_err(LlmError::from_reqwest)?;

        let status = response.status();
        let text = response.text().await.map_err(LlmError::from_reqwest)?;

        if !status.is_success() {
            let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(match status.as_u16() {
                401 | 403 => LlmError::Authentication {
                    status: status.as_u16(),
                    message,
                },
                429 => LlmError::RateLimited { message },
                code => LlmError::Api {
                    status: code,
                    message,
                },
            });
        }

        let completion: ChatCompletionResponse = serde_json::from_str(&text)?;
        let content = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(LlmError::EmptyContent)?;

        if let Some(usage) = completion.usage {
            debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Chat completion succeeded"
            );
        }

        Ok(ModelResponse {
            content,
            model: completion.model,
            usage: completion.usage,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Provider;

    fn endpoint(base_url: &str) -> Endpoint {
        Endpoint {
            provider: Provider::OpenAi,
            base_url: base_url.to_string(),
            api_key: "sk-test".to_string(),
            model: "gpt-4o-mini".to_string(),
        }
    }

    #[test]
    fn test_completions_url() {
        let client =
            OpenAiClient::new(endpoint("https://api.groq.com/openai/v1/"), Duration::from_secs(5))
                .unwrap();
        assert_eq!(
            client.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
        assert_eq!(client.name(), "gpt-4o-mini");
    }

    #[test]
    fn test_request_serialization() {
        let body = ChatCompletionRequest {
            model: "gpt-4o-mini",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
            temperature: 0.2,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_response_deserialization_with_null_content() {
        let json = r#"{"choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#;
        let parsed: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
        assert!(parsed.usage.is_none());
    }
}
