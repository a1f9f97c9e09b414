//! Core types for Jobkit

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// A fetched job posting or careers page
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobPosting {
    /// The fetched URL
    pub url: String,

    /// HTTP status code
    pub status_code: u16,

    /// Content-Type header value
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,

    /// Page `<title>`, when the body is HTML
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Body as received
    #[serde(skip)]
    pub raw: String,

    /// Plain text after boilerplate stripping
    pub text: String,
}

/// How a resume's text was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    Pdf,
    PlainText,
}

/// Text extracted from a CV or resume file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeDocument {
    pub path: PathBuf,
    pub format: SourceFormat,
    pub text: String,
}

/// A labelled block of text sent to the model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    pub label: String,
    pub body: String,
}

impl Payload {
    pub fn new(label: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            body: body.into(),
        }
    }
}

/// One outbound instruction to the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRequest {
    /// System instruction
    pub system: String,

    /// Labelled payloads, rendered in order
    pub payloads: Vec<Payload>,

    /// Task text appended after the payloads
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<String>,

    /// Sampling temperature
    pub temperature: f32,
}

impl PromptRequest {
    /// Create a request with the given system instruction
    pub fn new(system: impl Into<String>) -> Self {
        Self {
            system: system.into(),
            payloads: Vec::new(),
            task: None,
            temperature: crate::DEFAULT_TEMPERATURE,
        }
    }

    /// Append a payload
    pub fn payload(mut self, label: impl Into<String>, body: impl Into<String>) -> Self {
        self.payloads.push(Payload::new(label, body));
        self
    }

    /// Set the closing task
    pub fn task(mut self, task: impl Into<String>) -> Self {
        self.task = Some(task.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Render the user message: each payload as `Label:\nbody`, then the task
    pub fn user_message(&self) -> String {
        let mut message = String::new();
        for payload in &self.payloads {
            message.push_str(&payload.label);
            message.push_str(":\n");
            message.push_str(payload.body.trim());
            message.push_str("\n\n");
        }
        if let Some(ref task) = self.task {
            message.push_str(task.trim());
            message.push('\n');
        }
        message
    }
}

/// Token accounting reported by the provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

/// Markdown answer from the model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelResponse {
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
}

/// OpenAI-compatible provider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    #[default]
    OpenAi,
    Groq,
}

impl Provider {
    /// Environment variable holding this provider's API key
    pub fn api_key_var(self) -> &'static str {
        match self {
            Provider::OpenAi => "OPENAI_API_KEY",
            Provider::Groq => "GROQ_API_KEY",
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(Provider::OpenAi),
            "groq" => Ok(Provider::Groq),
            _ => Err("Invalid provider: must be openai or groq".to_string()),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::OpenAi => write!(f, "openai"),
            Provider::Groq => write!(f, "groq"),
        }
    }
}

/// Where and with which model to send prompts
#[derive(Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub provider: Provider,
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl fmt::Debug for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Endpoint")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(Provider::from_str("openai").unwrap(), Provider::OpenAi);
        assert_eq!(Provider::from_str("OpenAI").unwrap(), Provider::OpenAi);
        assert_eq!(Provider::from_str("groq").unwrap(), Provider::Groq);
        assert!(Provider::from_str("anthropic").is_err());
    }

    #[test]
    fn test_provider_display() {
        assert_eq!(Provider::OpenAi.to_string(), "openai");
        assert_eq!(Provider::Groq.to_string(), "groq");
    }

    #[test]
    fn test_user_message_renders_payloads_in_order() {
        let req = PromptRequest::new("system")
            .payload("Job Posting", "  Build pipelines.  ")
            .payload("CV", "Ten years of Rust.")
            .task("Is this a fit?");

        assert_eq!(
            req.user_message(),
            "Job Posting:\nBuild pipelines.\n\nCV:\nTen years of Rust.\n\nIs this a fit?\n"
        );
    }

    #[test]
    fn test_endpoint_debug_hides_key() {
        let endpoint = Endpoint {
            provider: Provider::OpenAi,
            base_url: "https://api.openai.com/v1".to_string(),
            api_key: "sk-secret".to_string(),
            model: "gpt-4o-mini".to_string(),
        };
        let debug = format!("{:?}", endpoint);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("gpt-4o-mini"));
    }

    #[test]
    fn test_posting_serialization_skips_raw() {
        let posting = JobPosting {
            url: "https://example.com/jobs/1".to_string(),
            status_code: 200,
            raw: "<html>".to_string(),
            text: "Role".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&posting).unwrap();
        assert!(!json.contains("<html>"));
        assert!(!json.contains("title"));
        assert!(json.contains("\"text\":\"Role\""));
    }
}
