use std::path::PathBuf;

use anyhow::{Context, anyhow};
use tracing::info;

use preflight_core::config::parse_duration;
use preflight_core::{Manifest, OverallStatus, ReadinessReport};
use preflight_health::HyperClient;
use preflight_report::{Evaluator, format_report, to_json, write_report};

/// Exit status for `--strict` runs that are not fully healthy.
const NOT_READY_EXIT: u8 = 2;

pub struct CheckOptions {
    pub manifest: PathBuf,
    pub output: Option<PathBuf>,
    pub text: bool,
    pub timeout: Option<String>,
    pub strict: bool,
}

/// Run one evaluation and emit the report. Returns the process exit status.
pub async fn check(opts: &CheckOptions) -> anyhow::Result<u8> {
    let mut manifest = Manifest::from_file(&opts.manifest)
        .with_context(|| format!("loading {}", opts.manifest.display()))?;

    if let Some(raw) = &opts.timeout {
        manifest.config.probe_timeout = parse_duration(raw)
            .filter(|d| !d.is_zero())
            .ok_or_else(|| anyhow!("invalid --timeout {raw:?}"))?;
    }

    let report = Evaluator::new(HyperClient::new()).evaluate(&manifest).await?;

    match &opts.output {
        Some(path) => {
            write_report(&report, path)?;
            info!(path = %path.display(), "report written");
        }
        None if !opts.text => println!("{}", to_json(&report)?),
        None => {}
    }
    if opts.text {
        println!("{}", format_report(&report));
    }

    Ok(exit_status(&report, opts.strict))
}

fn exit_status(report: &ReadinessReport, strict: bool) -> u8 {
    if strict && report.overall_status != OverallStatus::Healthy {
        NOT_READY_EXIT
    } else {
        0
    }
}
