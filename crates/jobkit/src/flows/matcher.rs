use super::{answer, ask, check_document, check_url};
use crate::config::Config;
use crate::document::{ensure_exists, read_resume};
use crate::error::{JobkitError, Subject};
use crate::fetch::PageFetcher;
use crate::llm::ChatModel;
use crate::prompts;
use crate::validate::DocumentKind;
use std::path::PathBuf;
use tracing::info;

/// Input for [`match_cv`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchInput {
    /// Job posting to match against
    pub job_url: String,
    /// CV file, PDF or plain text
    pub cv_path: PathBuf,
    /// Warn instead of failing when the URL does not look like a job posting
    pub skip_url_check: bool,
}

/// Match a CV against a job posting and draft a cover letter
///
/// Both the posting and the CV must pass their document checks before the
/// model is asked anything.
pub async fn match_cv(
    config: &Config,
    fetcher: &PageFetcher,
    model: &dyn ChatModel,
    input: &MatchInput,
) -> Result<String, JobkitError> {
    check_url(&input.job_url, Subject::JobUrl, input.skip_url_check)?;
    // Cheap local failure before the network round trip
    ensure_exists(&input.cv_path)?;

    let posting = fetcher.fetch(&input.job_url).await?;
    info!(
        url = %posting.url,
        title = posting.title.as_deref().unwrap_or(""),
        chars = posting.text.chars().count(),
        "Fetched job posting"
    );

    let cv = read_resume(&input.cv_path)?;
    info!(path = %cv.path.display(), chars = cv.text.chars().count(), "Read CV");

    check_document(
        config,
        DocumentKind::JobDescription,
        Subject::JobDescription,
        &posting.text,
    )?;
    check_document(config, DocumentKind::Cv, Subject::Cv, &cv.text)?;

    let request = prompts::fit_analysis(&posting, &cv, config.max_payload_chars);
    let response = ask(model, &request).await?;
    Ok(answer(&response))
}
