//! Health prober — one bounded GET per service.

use std::time::Duration;

use tracing::{debug, info, warn};

use preflight_core::{HealthVerdict, ServiceSpec, Verdicts};

use crate::classify::classify;
use crate::client::{HttpClient, ProbeError};

/// Probes services through an [`HttpClient`], each under its own timeout.
#[derive(Debug, Clone)]
pub struct HealthProber<C> {
    client: C,
    timeout: Duration,
}

impl<C: HttpClient> HealthProber<C> {
    pub fn new(client: C, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Probe a single service. Never fails; see [`classify`].
    pub async fn probe(&self, spec: &ServiceSpec) -> HealthVerdict {
        let url = spec.health_url();

        let outcome = match tokio::time::timeout(self.timeout, self.client.get(spec)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(ProbeError::Timeout(self.timeout)),
        };

        match &outcome {
            Ok(resp) => debug!(service = %spec.name, %url, status = resp.status, "health probe answered"),
            Err(e) => debug!(service = %spec.name, %url, error = %e, "health probe failed"),
        }

        let verdict = classify(&outcome, spec.criticality);
        if verdict.is_healthy() {
            info!(service = %spec.name, http_status = verdict.http_status, "service healthy");
        } else {
            warn!(
                service = %spec.name,
                http_status = verdict.http_status,
                criticality = %spec.criticality,
                "service unhealthy"
            );
        }
        verdict
    }

    /// Probe every service, one after another, in declaration order.
    ///
    /// Returns only once every probe has resolved.
    pub async fn probe_all(&self, services: &[ServiceSpec]) -> Verdicts {
        let mut verdicts = Verdicts::new();
        for spec in services {
            let verdict = self.probe(spec).await;
            verdicts.insert(spec.name.clone(), verdict);
        }
        verdicts
    }
}
