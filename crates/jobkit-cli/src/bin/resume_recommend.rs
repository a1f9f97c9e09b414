//! resume-recommend - roles for a resume, with job-site search links

use clap::Parser;
use jobkit::{recommend_roles, Config, JobkitError, OpenAiClient, RecommendInput};
use jobkit_cli::{exit_with, init_tracing, interactive, writeln_safe, RecommendArgs};
use std::io;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args = RecommendArgs::parse();
    init_tracing(args.verbose);

    match run(args).await {
        Ok(output) => writeln_safe(&output),
        Err(e) => exit_with(e),
    }
}

async fn run(args: RecommendArgs) -> Result<String, JobkitError> {
    let config = Config::from_env()?;
    let endpoint = config.endpoint(args.provider, args.model.as_deref())?;

    // Prompts go to stderr so stdout carries only the result
    let answers = interactive::collect(
        &mut io::stdin().lock(),
        &mut io::stderr(),
        args.resume,
        args.sites,
        args.location,
    )?;

    let model = OpenAiClient::new(endpoint, config.llm_timeout)?;
    let input = RecommendInput {
        resume_path: answers.resume,
        sites: answers.sites,
        locations: answers.locations,
    };
    recommend_roles(&config, &model, &input).await
}
