use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use clap::Args;

use crate::ingestion::IngestionController;
use crate::ingestion::fetch::{FetchConfig, HttpFetcher};
use crate::output::config::OutputConfig;
use crate::output::{Emitter, StdoutSink};
use crate::telemetry::{self};

/// Fetch a site.json and render its summary and cards
#[derive(Args)]
pub struct AnalyzeCmd {
    /// URL of the site document (must end in site.json)
    pub url: String,
    /// Give up on the request after this many seconds; 0 waits indefinitely.
    /// Overrides SITECARDS_TIMEOUT_SECS.
    #[arg(long)] pub timeout_secs: Option<u64>,
}

/// Returns whether the ingestion succeeded. Failures are already rendered by
/// the sink, so they are not surfaced again as an error.
pub async fn run(args: AnalyzeCmd, output: OutputConfig) -> Result<bool> {
    let log = telemetry::analyze();
    let t0 = Instant::now();

    let cfg = FetchConfig::from_env().with_timeout_secs(args.timeout_secs);
    let sink = Arc::new(StdoutSink::new("analyze", Emitter::new(output)));
    let controller = IngestionController::new(HttpFetcher::new(&cfg)?).with_sink(sink);

    let outcome = controller.ingest(&args.url).await;
    log.info_kv("done", [("duration_ms", t0.elapsed().as_millis().to_string())]);
    Ok(outcome.is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::config::OutputFormat;

    #[tokio::test]
    async fn rejected_url_reports_failure_without_error() {
        let args = AnalyzeCmd { url: "https://x/index.html".into(), timeout_secs: Some(0) };
        let ok = run(args, OutputConfig { format: OutputFormat::Json, pretty: false }).await.unwrap();
        assert!(!ok);
    }
}
