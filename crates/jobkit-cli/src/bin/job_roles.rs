//! job-roles - list matching roles from a careers page

use clap::Parser;
use jobkit::{extract_roles, Config, JobkitError, OpenAiClient, PageFetcher, Provider, RolesInput};
use jobkit_cli::{exit_with, init_tracing, writeln_safe, RolesArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = RolesArgs::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(output) => writeln_safe(&output),
        Err(e) => exit_with(e),
    }
}

async fn run(args: RolesArgs) -> Result<String, JobkitError> {
    let config = Config::from_env()?;

    // Groq when its key is present, otherwise OpenAI
    let provider = args
        .provider
        .unwrap_or_else(|| config.provider_or_fallback(Provider::Groq));
    let endpoint = config.endpoint(provider, args.model.as_deref())?;
    tracing::debug!(?endpoint, "Resolved model endpoint");

    let model = OpenAiClient::new(endpoint, config.llm_timeout)?;
    let fetcher = PageFetcher::new(config.fetch.clone())?;

    let input = RolesInput {
        url: args.url,
        focus_areas: args.focus,
        skip_url_check: args.skip_url_check,
    };
    extract_roles(&config, &fetcher, &model, &input).await
}
