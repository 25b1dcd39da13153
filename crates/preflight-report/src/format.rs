//! Report output: JSON document and human-readable summary.

use std::path::Path;

use preflight_core::ReadinessReport;

use crate::error::{EvaluationError, EvaluationResult};

/// Width of the value column inside the summary box.
const BOX_VALUE_WIDTH: usize = 28;

/// Pretty-printed JSON report.
pub fn to_json(report: &ReadinessReport) -> EvaluationResult<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

/// Write the JSON report to `path`, replacing any existing file.
pub fn write_report(report: &ReadinessReport, path: &Path) -> EvaluationResult<()> {
    let mut json = to_json(report)?;
    json.push('\n');
    std::fs::write(path, json).map_err(|source| EvaluationError::Write {
        path: path.to_path_buf(),
        source,
    })
}

pub fn format_report(report: &ReadinessReport) -> String {
    let mut out = String::new();

    out.push_str("\n╔══════════════════════════════════════════╗\n");
    out.push_str("║  Deployment Readiness                    ║\n");
    out.push_str("╠══════════════════════════════════════════╣\n");
    out.push_str(&format!(
        "║  Deployment: {:<28}║\n",
        fit_width(&report.deployment_name, BOX_VALUE_WIDTH)
    ));
    out.push_str(&format!("║  Status:     {:<28}║\n", report.overall_status));
    out.push_str(&format!("║  Score:      {:<28.4}║\n", report.readiness_score));
    out.push_str(&format!(
        "║  Critical:   {:<28}║\n",
        if report.critical_services_healthy { "all healthy" } else { "FAILING" }
    ));
    out.push_str("╚══════════════════════════════════════════╝\n\n");

    let total = report.service_statuses.len();
    let healthy = report
        .service_statuses
        .values()
        .filter(|v| v.is_healthy())
        .count();
    out.push_str(&format!("Services ({healthy}/{total} healthy):\n"));
    for (name, verdict) in &report.service_statuses {
        let mark = if verdict.is_healthy() { "✅" } else { "❌" };
        let code = match verdict.http_status {
            0 => "unreachable".to_string(),
            code => format!("HTTP {code}"),
        };
        out.push_str(&format!(
            "  {mark} {name:<24} {:<8} {code}\n",
            verdict.criticality
        ));
    }
    out.push('\n');

    if !report.startup_order.is_empty() {
        out.push_str("Startup order:\n");
        for (i, name) in report.startup_order.iter().enumerate() {
            out.push_str(&format!("  {}. {name}\n", i + 1));
        }
        out.push('\n');
    }

    out.push_str(&format!("Captured at {}\n", report.timestamp.to_rfc3339()));
    out
}

/// Cut `value` to at most `width` characters, marking the cut with `…`.
fn fit_width(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width - 1).collect();
    cut.push('…');
    cut
}
