use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use awards_config::builder::{DEFAULT_INPUT, DEFAULT_OUTPUT};
use awards_config::logging::{self, LogFormat};
use awards_config::{ConfigBuilder, DiscordClient, Settings};
use clap::Parser;

/// Build the awards site configuration, resolving Discord nominees.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Source document to read.
    #[arg(long, default_value = DEFAULT_INPUT)]
    input: PathBuf,

    /// Where to write the finalized configuration.
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,

    /// Default log filter when RUST_LOG is not set.
    #[arg(long, default_value = "info")]
    log_level: String,

    #[arg(long, value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,

    /// Override the Discord API root.
    #[arg(long)]
    api_base: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logging::init(&cli.log_level, cli.log_format);

    match run(cli).await {
        Ok(message) => {
            println!("{message}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<String> {
    let settings = Settings::from_env().context("invalid environment")?;

    let mut client = DiscordClient::new(&settings);
    if let Some(api_base) = cli.api_base {
        client = client.with_api_base(api_base);
    }

    let mut builder = ConfigBuilder::new(client);
    let summary = builder
        .run(&cli.input, &cli.output)
        .await
        .with_context(|| format!("failed to build {}", cli.output.display()))?;

    Ok(format!(
        "Wrote {} ({} nominations, {} nominees, {} member lookups)",
        cli.output.display(),
        summary.nominations,
        summary.nominees,
        summary.lookups
    ))
}
