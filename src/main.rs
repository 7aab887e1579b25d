use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenvy::dotenv;

use site_cards::output::config::OutputConfig;
use site_cards::{analyze, check, telemetry};

#[derive(Parser)]
#[command(name = "sitecards", about = "Summarize a site.json as a grid of content cards")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Analyze(analyze::AnalyzeCmd),
    Check(check::CheckCmd),
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenv().ok();
    let cli = Cli::parse();

    // initialize logging/tracing (stderr). Respect RUST_LOG and SITECARDS_LOG_FORMAT
    telemetry::config::init_tracing();
    let output = OutputConfig::from_env().with_json(cli.json);

    // a failed ingestion has already been rendered; only the exit status is left
    let ok = match cli.command {
        Commands::Analyze(args) => analyze::run(args, output).await?,
        Commands::Check(args) => { check::run(args, output).await?; true }
    };

    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}
