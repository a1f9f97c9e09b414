//! The three job-search flows
//!
//! Each flow takes the shared [`Config`], the model behind [`ChatModel`] and
//! its own input, and returns the Markdown to print. Plausibility checks run
//! before the model is called, so a rejected input never costs a request.

mod matcher;
mod recommend;
mod roles;

pub use matcher::{match_cv, MatchInput};
pub use recommend::{recommend_roles, RecommendInput};
pub use roles::{extract_roles, RolesInput};

use crate::config::Config;
use crate::error::{JobkitError, Subject};
use crate::format::normalize;
use crate::llm::ChatModel;
use crate::types::{ModelResponse, PromptRequest};
use crate::validate::{DocumentKind, UrlCheck};
use tracing::{debug, info, warn};

/// Run the URL check, rejecting unless `skip` downgrades a failure to a warning
fn check_url(url: &str, subject: Subject, skip: bool) -> Result<(), JobkitError> {
    let verdict = UrlCheck::default().check(url);
    if verdict.is_accepted() {
        debug!(url, reason = %verdict.reason, "URL check passed");
        return Ok(());
    }
    if skip {
        warn!(url, reason = %verdict.reason, "URL check failed, continuing anyway");
        return Ok(());
    }
    Err(JobkitError::Rejected {
        subject,
        reason: verdict.reason,
    })
}

/// Run the document check for `kind` with the configured thresholds
fn check_document(
    config: &Config,
    kind: DocumentKind,
    subject: Subject,
    text: &str,
) -> Result<(), JobkitError> {
    let verdict = config.validation.document_check(kind).check(text);
    if !verdict.is_accepted() {
        return Err(JobkitError::Rejected {
            subject,
            reason: verdict.reason,
        });
    }
    debug!(%subject, reason = %verdict.reason, "Document check passed");
    Ok(())
}

/// The single model call of a flow
async fn ask(model: &dyn ChatModel, request: &PromptRequest) -> Result<ModelResponse, JobkitError> {
    info!(model = model.name(), "Asking the model");
    let response = model.complete(request).await?;
    debug!(chars = response.content.len(), "Model answered");
    Ok(response)
}

/// Model answer as printed by the matcher and role extractor
fn answer(response: &ModelResponse) -> String {
    normalize(&response.content)
}
