//! Plausibility checks run before any model call
//!
//! Both checks are explicit, ordered rule sets of `{pattern, meaning}` pairs.
//! A [`Verdict`] records whether the input was accepted and why.

use serde::{Deserialize, Serialize};
use url::Url;

/// One heuristic rule: a lower-case substring and what finding it means
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rule {
    pub pattern: String,
    pub meaning: String,
}

impl Rule {
    pub fn new(pattern: impl Into<String>, meaning: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into().to_lowercase(),
            meaning: meaning.into(),
        }
    }
}

fn rules(pairs: &[(&str, &str)]) -> Vec<Rule> {
    pairs
        .iter()
        .map(|(pattern, meaning)| Rule::new(*pattern, *meaning))
        .collect()
}

/// Outcome of a plausibility check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    pub accepted: bool,
    pub reason: String,
    /// Meanings of the rules that matched
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matched: Vec<String>,
}

impl Verdict {
    pub fn accept(reason: impl Into<String>, matched: Vec<String>) -> Self {
        Self {
            accepted: true,
            reason: reason.into(),
            matched,
        }
    }

    pub fn reject(reason: impl Into<String>) -> Self {
        Self {
            accepted: false,
            reason: reason.into(),
            matched: Vec::new(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}

/// Path hints for job listing URLs
const URL_RULES: &[(&str, &str)] = &[
    ("/jobs", "job listings"),
    ("/job/", "single job posting"),
    ("/job-", "job posting"),
    ("/careers", "careers site"),
    ("/positions", "open positions"),
    ("/openings", "job openings"),
    ("/vacancies", "vacancies"),
];

/// Decides whether a URL plausibly points at a job posting or careers page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlCheck {
    rules: Vec<Rule>,
}

impl Default for UrlCheck {
    fn default() -> Self {
        Self::new(rules(URL_RULES))
    }
}

impl UrlCheck {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Check a URL. Pure: no network access.
    pub fn check(&self, url: &str) -> Verdict {
        let parsed = match Url::parse(url.trim()) {
            Ok(parsed) => parsed,
            Err(e) => return Verdict::reject(format!("'{}' is not a valid URL ({})", url, e)),
        };

        if !matches!(parsed.scheme(), "http" | "https") {
            return Verdict::reject(format!(
                "URL scheme '{}' is not http or https",
                parsed.scheme()
            ));
        }

        let path = parsed.path().to_lowercase();
        let matched: Vec<String> = self
            .rules
            .iter()
            .filter(|rule| path.contains(&rule.pattern) || path == rule.pattern.trim_end_matches('/'))
            .map(|rule| rule.meaning.clone())
            .collect();

        if matched.is_empty() {
            let hints: Vec<&str> = self.rules.iter().map(|r| r.pattern.as_str()).collect();
            Verdict::reject(format!(
                "path '{}' has no job-related segment (expected one of: {})",
                parsed.path(),
                hints.join(", ")
            ))
        } else {
            Verdict::accept(
                format!("path looks like a job page ({})", matched.join(", ")),
                matched,
            )
        }
    }
}

/// Which kind of document a text is expected to be
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Cv,
    JobDescription,
    CareersPage,
}

/// Thresholds for a document check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    pub min_chars: usize,
    pub min_words: usize,
    pub min_cues: usize,
}

impl DocumentKind {
    /// Defaults tuned against real CVs and postings
    pub fn default_thresholds(self) -> Thresholds {
        match self {
            DocumentKind::Cv => Thresholds {
                min_chars: 500,
                min_words: 50,
                min_cues: 2,
            },
            DocumentKind::JobDescription => Thresholds {
                min_chars: 500,
                min_words: 50,
                min_cues: 1,
            },
            DocumentKind::CareersPage => Thresholds {
                min_chars: 100,
                min_words: 10,
                min_cues: 0,
            },
        }
    }

    /// Section cues expected in this kind of document
    pub fn default_cues(self) -> Vec<Rule> {
        match self {
            DocumentKind::Cv => rules(&[
                ("experience", "experience section"),
                ("education", "education section"),
                ("skills", "skills section"),
                ("projects", "projects section"),
                ("summary", "summary section"),
                ("work", "work history"),
                ("certification", "certifications"),
            ]),
            DocumentKind::JobDescription => rules(&[
                ("responsibilities", "responsibilities"),
                ("requirements", "requirements"),
                ("qualifications", "qualifications"),
                ("role", "role description"),
                ("about the role", "about the role"),
                ("what you'll do", "what you'll do"),
            ]),
            DocumentKind::CareersPage => Vec::new(),
        }
    }

    fn label(self) -> &'static str {
        match self {
            DocumentKind::Cv => "CV",
            DocumentKind::JobDescription => "job description",
            DocumentKind::CareersPage => "careers page",
        }
    }
}

/// Decides whether extracted text is substantive enough to send to the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCheck {
    kind: DocumentKind,
    thresholds: Thresholds,
    cues: Vec<Rule>,
}

impl DocumentCheck {
    /// Check with the default thresholds and cues for `kind`
    pub fn for_kind(kind: DocumentKind) -> Self {
        Self::with_thresholds(kind, kind.default_thresholds())
    }

    /// Check with custom thresholds and the default cues for `kind`
    pub fn with_thresholds(kind: DocumentKind, thresholds: Thresholds) -> Self {
        Self {
            kind,
            thresholds,
            cues: kind.default_cues(),
        }
    }

    /// Replace the cue rules
    pub fn cues(mut self, cues: Vec<Rule>) -> Self {
        self.cues = cues;
        self
    }

    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    pub fn thresholds(&self) -> Thresholds {
        self.thresholds
    }

    /// Check a text
    pub fn check(&self, text: &str) -> Verdict {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Verdict::reject(
                "no readable text was found (scanned PDF without selectable text, or a page that did not load)",
            );
        }

        let chars = trimmed.chars().count();
        if chars < self.thresholds.min_chars {
            return Verdict::reject(format!(
                "only {} characters of text, a {} needs at least {}",
                chars,
                self.kind.label(),
                self.thresholds.min_chars
            ));
        }

        let words = trimmed.split_whitespace().count();
        if words < self.thresholds.min_words {
            return Verdict::reject(format!(
                "only {} words of text, a {} needs at least {}",
                words,
                self.kind.label(),
                self.thresholds.min_words
            ));
        }

        let lower = trimmed.to_lowercase();
        let matched: Vec<String> = self
            .cues
            .iter()
            .filter(|cue| lower.contains(&cue.pattern))
            .map(|cue| cue.meaning.clone())
            .collect();

        if matched.len() < self.thresholds.min_cues {
            let expected: Vec<&str> = self.cues.iter().map(|c| c.pattern.as_str()).collect();
            return Verdict::reject(format!(
                "found {} of the {} section cues a {} should have (looked for: {})",
                matched.len(),
                self.thresholds.min_cues,
                self.kind.label(),
                expected.join(", ")
            ));
        }

        let reason = if matched.is_empty() {
            format!("{} characters of text", chars)
        } else {
            format!("{} characters with {}", chars, matched.join(", "))
        };
        Verdict::accept(reason, matched)
    }
}
