use clap::Parser;
use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use tfe_plan_summary::cli::{Cli, normalize_args};
use tfe_plan_summary::config::Settings;
use tfe_plan_summary::{Pipeline, TfeClient, TracingLog};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));
    let settings = Settings::try_from(cli)?;

    let client = TfeClient::new(
        settings.credential.token.clone(),
        &settings.credential.host,
        settings.timeout,
    )?;

    tracing::debug!(
        api_base = client.api_base(),
        target = %settings.target,
        "resolving latest speculative plan"
    );

    let pipeline = Pipeline::new(Box::new(client), Box::new(TracingLog));
    let summary = pipeline.run(&settings.target).await?;

    println!("{}", summary.to_json()?);

    Ok(())
}
