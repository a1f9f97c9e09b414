//! Configuration loaded from the environment
//!
//! [`Config::from_env`] reads an optional `.env` file and then the process
//! environment. [`Config::from_lookup`] takes any lookup function so the
//! parsing can be exercised without touching global state.

use crate::error::JobkitError;
use crate::fetch::FetchOptions;
use crate::types::{Endpoint, Provider};
use crate::validate::{DocumentCheck, DocumentKind, Thresholds};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

/// OpenAI API base URL
pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Groq OpenAI-compatible base URL
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Default OpenAI model
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Default Groq model
pub const DEFAULT_GROQ_MODEL: &str = "llama-3.1-8b-instant";

/// Default model request timeout
pub const DEFAULT_LLM_TIMEOUT: Duration = Duration::from_secs(120);

/// Default cap on characters per payload sent to the model
pub const DEFAULT_MAX_PAYLOAD_CHARS: usize = 60_000;

/// Thresholds for each document kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationConfig {
    pub cv: Thresholds,
    pub job_description: Thresholds,
    pub careers_page: Thresholds,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            cv: DocumentKind::Cv.default_thresholds(),
            job_description: DocumentKind::JobDescription.default_thresholds(),
            careers_page: DocumentKind::CareersPage.default_thresholds(),
        }
    }
}

impl ValidationConfig {
    /// Build the document check for `kind` with the configured thresholds
    pub fn document_check(&self, kind: DocumentKind) -> DocumentCheck {
        let thresholds = match kind {
            DocumentKind::Cv => self.cv,
            DocumentKind::JobDescription => self.job_description,
            DocumentKind::CareersPage => self.careers_page,
        };
        DocumentCheck::with_thresholds(kind, thresholds)
    }
}

/// Settings shared by every flow
#[derive(Clone)]
pub struct Config {
    openai_api_key: Option<String>,
    groq_api_key: Option<String>,
    openai_model: String,
    groq_model: String,
    openai_base_url: String,
    groq_base_url: String,
    /// Page fetch settings
    pub fetch: FetchOptions,
    /// Model request timeout
    pub llm_timeout: Duration,
    /// Longest payload sent to the model, in characters
    pub max_payload_chars: usize,
    /// Document check thresholds
    pub validation: ValidationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            openai_api_key: None,
            groq_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            groq_model: DEFAULT_GROQ_MODEL.to_string(),
            openai_base_url: OPENAI_BASE_URL.to_string(),
            groq_base_url: GROQ_BASE_URL.to_string(),
            fetch: FetchOptions::default(),
            llm_timeout: DEFAULT_LLM_TIMEOUT,
            max_payload_chars: DEFAULT_MAX_PAYLOAD_CHARS,
            validation: ValidationConfig::default(),
        }
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("openai_api_key", &self.openai_api_key.as_ref().map(|_| "<set>"))
            .field("groq_api_key", &self.groq_api_key.as_ref().map(|_| "<set>"))
            .field("openai_model", &self.openai_model)
            .field("groq_model", &self.groq_model)
            .field("openai_base_url", &self.openai_base_url)
            .field("groq_base_url", &self.groq_base_url)
            .field("fetch", &self.fetch)
            .field("llm_timeout", &self.llm_timeout)
            .field("max_payload_chars", &self.max_payload_chars)
            .field("validation", &self.validation)
            .finish()
    }
}

impl Config {
    /// Load `.env` (if present) and read the process environment
    pub fn from_env() -> Result<Self, JobkitError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("Ignoring unreadable .env file: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from a variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, JobkitError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let defaults = Config::default();
        let defaults_validation = defaults.validation;

        let fetch_timeout_secs: u64 = parse_var(&get, "JOBKIT_FETCH_TIMEOUT_SECS", 25)?;
        let llm_timeout_secs: u64 = parse_var(&get, "JOBKIT_LLM_TIMEOUT_SECS", 120)?;

        let validation = ValidationConfig {
            cv: Thresholds {
                min_chars: parse_var(&get, "JOBKIT_CV_MIN_CHARS", defaults_validation.cv.min_chars)?,
                min_words: parse_var(&get, "JOBKIT_CV_MIN_WORDS", defaults_validation.cv.min_words)?,
                min_cues: parse_var(&get, "JOBKIT_CV_MIN_CUES", defaults_validation.cv.min_cues)?,
            },
            job_description: Thresholds {
                min_chars: parse_var(
                    &get,
                    "JOBKIT_JD_MIN_CHARS",
                    defaults_validation.job_description.min_chars,
                )?,
                min_words: parse_var(
                    &get,
                    "JOBKIT_JD_MIN_WORDS",
                    defaults_validation.job_description.min_words,
                )?,
                min_cues: parse_var(
                    &get,
                    "JOBKIT_JD_MIN_CUES",
                    defaults_validation.job_description.min_cues,
                )?,
            },
            careers_page: defaults_validation.careers_page,
        };

        Ok(Config {
            openai_api_key: get("OPENAI_API_KEY"),
            groq_api_key: get("GROQ_API_KEY"),
            openai_model: get("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            groq_model: get("GROQ_MODEL").unwrap_or(defaults.groq_model),
            openai_base_url: get("OPENAI_BASE_URL").unwrap_or(defaults.openai_base_url),
            groq_base_url: get("GROQ_BASE_URL").unwrap_or(defaults.groq_base_url),
            fetch: FetchOptions {
                timeout: Duration::from_secs(fetch_timeout_secs),
                ..defaults.fetch
            },
            llm_timeout: Duration::from_secs(llm_timeout_secs),
            max_payload_chars: parse_var(
                &get,
                "JOBKIT_MAX_PAYLOAD_CHARS",
                defaults.max_payload_chars,
            )?,
            validation,
        })
    }

    /// Set the API key for a provider
    pub fn with_api_key(mut self, provider: Provider, key: impl Into<String>) -> Self {
        match provider {
            Provider::OpenAi => self.openai_api_key = Some(key.into()),
            Provider::Groq => self.groq_api_key = Some(key.into()),
        }
        self
    }

    /// Set the base URL for a provider
    pub fn with_base_url(mut self, provider: Provider, url: impl Into<String>) -> Self {
        match provider {
            Provider::OpenAi => self.openai_base_url = url.into(),
            Provider::Groq => self.groq_base_url = url.into(),
        }
        self
    }

    /// True if an API key is configured for `provider`
    pub fn has_api_key(&self, provider: Provider) -> bool {
        match provider {
            Provider::OpenAi => self.openai_api_key.is_some(),
            Provider::Groq => self.groq_api_key.is_some(),
        }
    }

    /// `preferred` when its key is set, otherwise OpenAI
    pub fn provider_or_fallback(&self, preferred: Provider) -> Provider {
        if self.has_api_key(preferred) {
            preferred
        } else {
            Provider::OpenAi
        }
    }

    /// Resolve the endpoint for a provider, failing if its key is missing
    pub fn endpoint(&self, provider: Provider, model: Option<&str>) -> Result<Endpoint, JobkitError> {
        let (key, default_model, base_url) = match provider {
            Provider::OpenAi => (&self.openai_api_key, &self.openai_model, &self.openai_base_url),
            Provider::Groq => (&self.groq_api_key, &self.groq_model, &self.groq_base_url),
        };

        let api_key = key
            .clone()
            .ok_or(JobkitError::MissingApiKey(provider.api_key_var()))?;

        Ok(Endpoint {
            provider,
            base_url: base_url.clone(),
            api_key,
            model: model
                .map(str::to_string)
                .unwrap_or_else(|| default_model.clone()),
        })
    }
}

fn parse_var<T, G>(get: &G, key: &str, default: T) -> Result<T, JobkitError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(value) => value.parse().map_err(|_| JobkitError::InvalidConfig {
            key: key.to_string(),
            value,
        }),
        None => Ok(default),
    }
}
