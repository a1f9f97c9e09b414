//! Jobkit - LLM-assisted job search
//!
//! This crate holds everything the `job-roles`, `cv-match` and
//! `resume-recommend` programs do, so each binary is only argument parsing
//! and printing.
//!
//! ## Flows
//!
//! Every flow is a straight pipeline: fetch or read the input, extract text,
//! run the plausibility checks, build one prompt, make one model call and
//! format the answer.
//!
//! - [`flows::extract_roles`] - roles on a careers page
//! - [`flows::match_cv`] - CV against a job posting, with a cover letter
//! - [`flows::recommend_roles`] - roles for a resume, with search links
//!
//! The model sits behind the [`ChatModel`] trait; [`OpenAiClient`] talks to
//! OpenAI or Groq.

pub mod config;
pub mod convert;
pub mod document;
mod error;
pub mod fetch;
pub mod flows;
pub mod format;
pub mod links;
pub mod llm;
pub mod prompts;
mod types;
pub mod validate;

pub use config::Config;
pub use document::read_resume;
pub use error::{ErrorKind, FetchError, JobkitError, LlmError, Subject};
pub use fetch::{FetchOptions, PageFetcher};
pub use flows::{
    extract_roles, match_cv, recommend_roles, MatchInput, RecommendInput, RolesInput,
};
pub use llm::{ChatModel, OpenAiClient};
pub use types::{
    Endpoint, JobPosting, ModelResponse, Payload, PromptRequest, Provider, ResumeDocument,
    SourceFormat, Usage,
};
pub use validate::{DocumentCheck, DocumentKind, Rule, Thresholds, UrlCheck, Verdict};

/// User-Agent sent with page fetches; many careers sites block unknown agents
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/117.0.0.0 Safari/537.36";

/// Sampling temperature for every prompt
pub const DEFAULT_TEMPERATURE: f32 = 0.2;

/// Careers page used by `job-roles` when no URL is given
pub const DEFAULT_CAREERS_URL: &str = "https://www.google.com/about/careers/applications/jobs";
