//! The evaluation pass.

use std::path::Path;

use chrono::Utc;
use tracing::{info, warn};

use preflight_core::{Manifest, OverallStatus, ReadinessReport};
use preflight_health::{HealthProber, HttpClient};
use preflight_score::{readiness_score, resolve};

use crate::assemble::assemble;
use crate::error::EvaluationResult;

/// Runs evaluation passes against manifests.
///
/// Holds no state between runs; every call to [`Evaluator::evaluate`]
/// probes afresh.
#[derive(Debug, Clone)]
pub struct Evaluator<C> {
    client: C,
}

impl<C: HttpClient> Evaluator<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Load a manifest from disk and evaluate it.
    pub async fn evaluate_path(&self, path: &Path) -> EvaluationResult<ReadinessReport> {
        let manifest = Manifest::from_file(path)?;
        self.evaluate(&manifest).await
    }

    /// Evaluate one manifest.
    ///
    /// The startup order is computed before any probe is sent, so graph
    /// errors surface without touching the network.
    ///
    /// # Errors
    ///
    /// Only graph errors; unreachable or failing services end up as
    /// unhealthy verdicts in the report.
    pub async fn evaluate(&self, manifest: &Manifest) -> EvaluationResult<ReadinessReport> {
        let config = &manifest.config;
        info!(
            deployment = %manifest.deployment_name,
            services = manifest.services.len(),
            timeout = ?config.probe_timeout,
            "evaluation starting"
        );

        let startup_order = preflight_graph::startup_order(&manifest.services)?;

        let prober = HealthProber::new(&self.client, config.probe_timeout);
        let verdicts = prober.probe_all(&manifest.services).await;

        let score = readiness_score(&manifest.services, &verdicts, &config.weights);
        let resolution = resolve(&manifest.services, &verdicts, score, &config.thresholds);

        let report = assemble(
            &manifest.deployment_name,
            score,
            resolution,
            verdicts,
            startup_order,
            Utc::now(),
        );

        match report.overall_status {
            OverallStatus::Healthy => info!(
                deployment = %report.deployment_name,
                score = report.readiness_score,
                "deployment ready"
            ),
            status => warn!(
                deployment = %report.deployment_name,
                score = report.readiness_score,
                %status,
                critical_services_healthy = report.critical_services_healthy,
                "deployment not fully ready"
            ),
        }

        Ok(report)
    }
}
