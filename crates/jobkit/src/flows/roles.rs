use super::{answer, ask, check_document, check_url};
use crate::config::Config;
use crate::error::{JobkitError, Subject};
use crate::fetch::PageFetcher;
use crate::llm::ChatModel;
use crate::prompts;
use crate::validate::DocumentKind;
use crate::DEFAULT_CAREERS_URL;
use tracing::info;

/// Input for [`extract_roles`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RolesInput {
    /// Careers page to read
    pub url: String,
    /// Areas the roles must relate to; empty means the default areas
    pub focus_areas: Vec<String>,
    /// Warn instead of failing when the URL does not look like a careers page
    pub skip_url_check: bool,
}

impl Default for RolesInput {
    fn default() -> Self {
        Self {
            url: DEFAULT_CAREERS_URL.to_string(),
            focus_areas: Vec::new(),
            skip_url_check: false,
        }
    }
}

/// Fetch a careers page and have the model list the matching roles
pub async fn extract_roles(
    config: &Config,
    fetcher: &PageFetcher,
    model: &dyn ChatModel,
    input: &RolesInput,
) -> Result<String, JobkitError> {
    check_url(&input.url, Subject::CareersUrl, input.skip_url_check)?;

    let page = fetcher.fetch(&input.url).await?;
    info!(url = %page.url, chars = page.text.chars().count(), "Fetched careers page");

    check_document(config, DocumentKind::CareersPage, Subject::CareersPage, &page.text)?;

    let request = prompts::role_extraction(&page, &input.focus_areas, config.max_payload_chars);
    let response = ask(model, &request).await?;
    Ok(answer(&response))
}
