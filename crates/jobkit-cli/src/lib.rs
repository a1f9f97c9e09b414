//! Shared plumbing for the Jobkit command line programs
//!
//! Argument structs live here rather than in the binaries so parsing can be
//! unit tested.

pub mod interactive;

use clap::Parser;
use jobkit::{JobkitError, Provider, DEFAULT_CAREERS_URL};
use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Extract DevOps, SRE and platform roles from a careers page
#[derive(Parser, Debug)]
#[command(name = "job-roles")]
#[command(author, version, about, long_about = None)]
pub struct RolesArgs {
    /// Careers page URL
    #[arg(long, default_value = DEFAULT_CAREERS_URL)]
    pub url: String,

    /// Model provider: openai or groq (defaults to groq when GROQ_API_KEY is set)
    #[arg(long)]
    pub provider: Option<Provider>,

    /// Model name, overriding OPENAI_MODEL / GROQ_MODEL
    #[arg(long)]
    pub model: Option<String>,

    /// Area the roles must relate to (repeatable)
    #[arg(long = "focus", value_name = "AREA")]
    pub focus: Vec<String>,

    /// Warn instead of failing when the URL does not look like a careers page
    #[arg(long)]
    pub skip_url_check: bool,

    /// Log each step to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Match a CV against a job posting and draft a cover letter
#[derive(Parser, Debug)]
#[command(name = "cv-match")]
#[command(author, version, about, long_about = None)]
pub struct MatchArgs {
    /// Job posting URL
    #[arg(long)]
    pub job_url: String,

    /// CV file (.pdf, .txt or .md)
    #[arg(long)]
    pub cv: PathBuf,

    /// Model provider: openai or groq
    #[arg(long, default_value = "openai")]
    pub provider: Provider,

    /// Model name, overriding OPENAI_MODEL / GROQ_MODEL
    #[arg(long)]
    pub model: Option<String>,

    /// Warn instead of failing when the URL does not look like a job posting
    #[arg(long)]
    pub skip_url_check: bool,

    /// Log each step to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Recommend roles for a resume with job-site search links
///
/// Asks for anything not given on the command line.
#[derive(Parser, Debug)]
#[command(name = "resume-recommend")]
#[command(author, version, about, long_about = None)]
pub struct RecommendArgs {
    /// Resume file (.pdf, .txt or .md)
    #[arg(long)]
    pub resume: Option<PathBuf>,

    /// Job sites, comma separated (e.g. "linkedin, indeed")
    #[arg(long)]
    pub sites: Option<String>,

    /// Locations, comma separated (e.g. "Berlin, Remote")
    #[arg(long)]
    pub location: Option<String>,

    /// Model provider: openai or groq
    #[arg(long, default_value = "openai")]
    pub provider: Provider,

    /// Model name, overriding OPENAI_MODEL / GROQ_MODEL
    #[arg(long)]
    pub model: Option<String>,

    /// Log each step to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Log filter used when `RUST_LOG` is unset
pub fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "jobkit=debug,jobkit_cli=debug,warn"
    } else {
        "warn"
    }
}

/// Install the stderr log subscriber
pub fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

/// Write to stdout, exit silently on broken pipe
pub fn writeln_safe(s: &str) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = writeln!(handle, "{}", s) {
        if e.kind() == io::ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
        eprintln!("Error writing to stdout: {}", e);
        std::process::exit(1);
    }
}

/// Print the error and exit with its code
pub fn exit_with(err: JobkitError) -> ! {
    let message = err.to_string();
    eprintln!("Error: {}", message);
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            eprintln!("  caused by: {}", cause_text);
        }
        source = cause.source();
    }
    std::process::exit(err.exit_code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roles_defaults() {
        let args = RolesArgs::try_parse_from(["job-roles"]).unwrap();
        assert_eq!(args.url, DEFAULT_CAREERS_URL);
        assert!(args.provider.is_none());
        assert!(args.focus.is_empty());
        assert!(!args.skip_url_check);
        assert!(!args.verbose);
    }

    #[test]
    fn test_roles_repeatable_focus() {
        let args = RolesArgs::try_parse_from([
            "job-roles",
            "--url",
            "https://example.com/careers",
            "--focus",
            "DevOps",
            "--focus",
            "Data Engineering",
            "--provider",
            "groq",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.focus, vec!["DevOps", "Data Engineering"]);
        assert_eq!(args.provider, Some(Provider::Groq));
        assert!(args.verbose);
    }

    #[test]
    fn test_match_requires_url_and_cv() {
        assert!(MatchArgs::try_parse_from(["cv-match", "--cv", "cv.pdf"]).is_err());
        assert!(MatchArgs::try_parse_from(["cv-match", "--job-url", "https://x.com/jobs/1"]).is_err());

        let args = MatchArgs::try_parse_from([
            "cv-match",
            "--job-url",
            "https://x.com/jobs/1",
            "--cv",
            "cv.pdf",
            "--skip-url-check",
        ])
        .unwrap();
        assert_eq!(args.cv, PathBuf::from("cv.pdf"));
        assert_eq!(args.provider, Provider::OpenAi);
        assert!(args.skip_url_check);
    }

    #[test]
    fn test_invalid_provider_rejected() {
        let result = MatchArgs::try_parse_from([
            "cv-match",
            "--job-url",
            "https://x.com/jobs/1",
            "--cv",
            "cv.pdf",
            "--provider",
            "anthropic",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_recommend_all_optional() {
        let args = RecommendArgs::try_parse_from(["resume-recommend"]).unwrap();
        assert!(args.resume.is_none());
        assert!(args.sites.is_none());
        assert!(args.location.is_none());

        let args = RecommendArgs::try_parse_from([
            "resume-recommend",
            "--resume",
            "me.md",
            "--sites",
            "linkedin,indeed",
            "--location",
            "Berlin",
        ])
        .unwrap();
        assert_eq!(args.sites.as_deref(), Some("linkedin,indeed"));
        assert_eq!(args.location.as_deref(), Some("Berlin"));
    }

    #[test]
    fn test_default_filter() {
        assert_eq!(default_filter(false), "warn");
        assert!(default_filter(true).contains("jobkit=debug"));
    }
}
