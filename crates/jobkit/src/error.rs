//! Error types for Jobkit

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    /// URL could not be parsed
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// URL has invalid scheme
    #[error("Invalid URL: must start with http:// or https://")]
    InvalidUrlScheme,

    /// Failed to build HTTP client
    #[error("Failed to create HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Request timed out
    #[error("Request timed out: server did not respond in time")]
    Timeout,

    /// Failed to connect to server
    #[error("Failed to connect to server")]
    ConnectError(#[source] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Server returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// Body is not textual
    #[error("Binary content ({content_type}) is not supported, expected an HTML or text page")]
    BinaryContent { content_type: String },

    /// Other request error
    #[error("Request failed: {0}")]
    RequestError(String),
}

impl FetchError {
    /// Create an error from a reqwest error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout
        } else if err.is_connect() {
            FetchError::ConnectError(err)
        } else {
            FetchError::RequestError(err.to_string())
        }
    }
}

/// Errors returned by the language model endpoint
#[derive(Debug, Error)]
pub enum LlmError {
    /// Failed to build HTTP client
    #[error("Failed to create LLM HTTP client")]
    ClientBuildError(#[source] reqwest::Error),

    /// Network failure talking to the endpoint
    #[error("LLM request failed: {0}")]
    Network(String),

    /// API key rejected
    #[error("LLM authentication failed (status {status}): {message}")]
    Authentication { status: u16, message: String },

    /// Provider rate limit hit
    #[error("LLM rate limit exceeded: {message}")]
    RateLimited { message: String },

    /// Any other non-success status
    #[error("LLM API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not the expected JSON
    #[error("Failed to decode LLM response: {0}")]
    Parse(#[from] serde_json::Error),

    /// Model answered with no text
    #[error("LLM returned empty content")]
    EmptyContent,
}

impl LlmError {
    /// Create an error from a reqwest transport error
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            LlmError::Network("request timed out".to_string())
        } else {
            LlmError::Network(err.to_string())
        }
    }
}

/// Input that a plausibility check was applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    JobUrl,
    CareersUrl,
    JobDescription,
    Cv,
    Resume,
    CareersPage,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Subject::JobUrl => "job posting URL",
            Subject::CareersUrl => "careers page URL",
            Subject::JobDescription => "job description",
            Subject::Cv => "CV",
            Subject::Resume => "resume",
            Subject::CareersPage => "careers page",
        };
        f.write_str(name)
    }
}

/// Broad category of a failure, used for exit codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Io,
    Validation,
    Upstream,
}

impl ErrorKind {
    /// Process exit code for this kind of failure
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorKind::Io => 1,
            ErrorKind::Configuration => 2,
            ErrorKind::Validation => 3,
            ErrorKind::Upstream => 4,
        }
    }
}

/// Top-level error for a flow run
#[derive(Debug, Error)]
pub enum JobkitError {
    /// Required API key is absent
    #[error("{0} is not set. Put it in a .env file or the environment")]
    MissingApiKey(&'static str),

    /// Environment variable holds an unusable value
    #[error("Invalid value for {key}: {value:?}")]
    InvalidConfig { key: String, value: String },

    /// Input file is absent
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Input file could not be read
    #[error("Failed to read {}", .path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input file has an extension we cannot extract text from
    #[error("Unsupported file type for {}: expected .pdf, .txt or .md", .0.display())]
    UnsupportedFile(PathBuf),

    /// PDF parsing failed
    #[error("Failed to extract text from PDF {}: {message}", .path.display())]
    PdfExtract { path: PathBuf, message: String },

    /// Interactive input could not be read
    #[error("Failed to read interactive input")]
    Prompt(#[source] std::io::Error),

    /// Page fetch failed
    #[error("Failed to fetch page: {0}")]
    Fetch(#[from] FetchError),

    /// A plausibility check rejected the input
    #[error("The {subject} does not look valid: {reason}")]
    Rejected { subject: Subject, reason: String },

    /// Model call failed
    #[error(transparent)]
    Llm(#[from] LlmError),
}

impl JobkitError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobkitError::MissingApiKey(_) | JobkitError::InvalidConfig { .. } => {
                ErrorKind::Configuration
            }
            JobkitError::FileNotFound(_)
            | JobkitError::ReadFile { .. }
            | JobkitError::UnsupportedFile(_)
            | JobkitError::PdfExtract { .. }
            | JobkitError::Prompt(_)
            | JobkitError::Fetch(_) => ErrorKind::Io,
            JobkitError::Rejected { .. } => ErrorKind::Validation,
            JobkitError::Llm(_) => ErrorKind::Upstream,
        }
    }

    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        self.kind().exit_code()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            FetchError::InvalidUrlScheme.to_string(),
            "Invalid URL: must start with http:// or https://"
        );
        assert_eq!(
            FetchError::HttpStatus {
                status: 404,
                url: "https://example.com/jobs".to_string()
            }
            .to_string(),
            "Server returned HTTP 404 for https://example.com/jobs"
        );
        assert_eq!(
            JobkitError::MissingApiKey("OPENAI_API_KEY").to_string(),
            "OPENAI_API_KEY is not set. Put it in a .env file or the environment"
        );
        assert_eq!(
            JobkitError::Rejected {
                subject: Subject::Cv,
                reason: "too short".to_string()
            }
            .to_string(),
            "The CV does not look valid: too short"
        );
    }

    #[test]
    fn test_llm_error_is_transparent() {
        let err = JobkitError::from(LlmError::RateLimited {
            message: "slow down".to_string(),
        });
        assert_eq!(err.to_string(), "LLM rate limit exceeded: slow down");
    }

    #[test]
    fn test_exit_codes_are_distinct_per_kind() {
        assert_eq!(JobkitError::MissingApiKey("GROQ_API_KEY").exit_code(), 2);
        assert_eq!(
            JobkitError::FileNotFound(PathBuf::from("cv.pdf")).exit_code(),
            1
        );
        assert_eq!(JobkitError::Fetch(FetchError::Timeout).exit_code(), 1);
        assert_eq!(
            JobkitError::Rejected {
                subject: Subject::JobUrl,
                reason: String::new()
            }
            .exit_code(),
            3
        );
        assert_eq!(JobkitError::Llm(LlmError::EmptyContent).exit_code(), 4);
    }
}
