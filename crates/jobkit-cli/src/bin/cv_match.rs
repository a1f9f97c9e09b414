//! cv-match - fit analysis and cover letter for a CV against a job posting

use clap::Parser;
use jobkit::{match_cv, Config, JobkitError, MatchInput, OpenAiClient, PageFetcher};
use jobkit_cli::{exit_with, init_tracing, writeln_safe, MatchArgs};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = MatchArgs::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(output) => writeln_safe(&output),
        Err(e) => exit_with(e),
    }
}

async fn run(args: MatchArgs) -> Result<String, JobkitError> {
    let config = Config::from_env()?;
    let endpoint = config.endpoint(args.provider, args.model.as_deref())?;
    tracing::debug!(?endpoint, "Resolved model endpoint");

    let model = OpenAiClient::new(endpoint, config.llm_timeout)?;
    let fetcher = PageFetcher::new(config.fetch.clone())?;

    let input = MatchInput {
        job_url: args.job_url,
        cv_path: args.cv,
        skip_url_check: args.skip_url_check,
    };
    match_cv(&config, &fetcher, &model, &input).await
}
