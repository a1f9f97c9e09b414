use super::{ask, check_document};
use crate::config::Config;
use crate::document::read_resume;
use crate::error::{JobkitError, Subject};
use crate::format::format_recommendations;
use crate::llm::ChatModel;
use crate::prompts;
use crate::validate::DocumentKind;
use std::path::PathBuf;
use tracing::info;

/// Input for [`recommend_roles`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendInput {
    /// Resume file, PDF or plain text
    pub resume_path: PathBuf,
    /// Job sites to build search links for, e.g. `linkedin`, `indeed.com`
    pub sites: Vec<String>,
    /// Locations to search in; empty means no location filter
    pub locations: Vec<String>,
}

/// Summarize a resume, recommend roles and link a search for each
pub async fn recommend_roles(
    config: &Config,
    model: &dyn ChatModel,
    input: &RecommendInput,
) -> Result<String, JobkitError> {
    let resume = read_resume(&input.resume_path)?;
    info!(path = %resume.path.display(), chars = resume.text.chars().count(), "Read resume");

    check_document(config, DocumentKind::Cv, Subject::Resume, &resume.text)?;

    let request = prompts::recommendation(&resume, &input.locations, config.max_payload_chars);
    let response = ask(model, &request).await?;
    Ok(format_recommendations(
        &response.content,
        &input.sites,
        &input.locations,
    ))
}
