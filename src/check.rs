use anyhow::Result;
use clap::Args;

use crate::ingestion::url;
use crate::output::Emitter;
use crate::output::config::OutputConfig;
use crate::output::types::{CheckPlan, Report};
use crate::telemetry::{self};
use crate::telemetry::ops::check::Phase as CheckPhase;

/// Validate a site document URL without fetching it
#[derive(Args)]
pub struct CheckCmd {
    pub url: String,
}

pub async fn run(args: CheckCmd, output: OutputConfig) -> Result<()> {
    let log = telemetry::check();
    let _g = log.root_span_kv([("url", args.url.clone())]).entered();

    let plan = {
        let _s = log.span(&CheckPhase::Plan).entered();
        plan(&args.url)
    };
    if plan.valid { log.info(format!("📝 would fetch {}", plan.url)); }
    else { log.warn(format!("🚫 {} rejected", plan.url)); }

    Emitter::new(output).emit("check", &Report::Plan(&plan), None)?;
    Ok(())
}

pub fn plan(candidate: &str) -> CheckPlan {
    match url::validate(candidate) {
        Ok(valid) => CheckPlan { url: valid.to_string(), valid: true, reason: None },
        Err(e) => CheckPlan { url: candidate.to_string(), valid: false, reason: Some(e.to_string()) },
    }
}
