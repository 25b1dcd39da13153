//! Status resolution.
//!
//! A pure function of (verdicts, score). The high-criticality gate is
//! checked before any score threshold.

use tracing::debug;

use preflight_core::{Criticality, OverallStatus, ServiceSpec, StatusThresholds, Verdicts};

/// Outcome of status resolution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    pub overall_status: OverallStatus,
    pub critical_services_healthy: bool,
}

/// True iff every high-criticality service has a healthy verdict.
///
/// Medium and low services never affect this flag. Vacuously true when
/// there are no high services.
pub fn critical_services_healthy(services: &[ServiceSpec], verdicts: &Verdicts) -> bool {
    services
        .iter()
        .filter(|s| s.criticality == Criticality::High)
        .all(|s| verdicts.get(&s.name).is_some_and(|v| v.is_healthy()))
}

/// Map the gate and score onto a status. First matching rule wins;
/// `NotReady` when none match.
pub fn resolve_status(
    critical_services_healthy: bool,
    score: f64,
    thresholds: &StatusThresholds,
) -> OverallStatus {
    let rules = [
        (!critical_services_healthy, OverallStatus::Critical),
        (score >= thresholds.healthy, OverallStatus::Healthy),
        (score >= thresholds.degraded, OverallStatus::Degraded),
    ];

    rules
        .into_iter()
        .find_map(|(matched, status)| matched.then_some(status))
        .unwrap_or(OverallStatus::NotReady)
}

/// Compute the gate flag and the overall status for one run.
pub fn resolve(
    services: &[ServiceSpec],
    verdicts: &Verdicts,
    score: f64,
    thresholds: &StatusThresholds,
) -> Resolution {
    let critical_ok = critical_services_healthy(services, verdicts);
    let overall_status = resolve_status(critical_ok, score, thresholds);
    debug!(score, critical_ok, status = %overall_status, "status resolved");

    Resolution {
        overall_status,
        critical_services_healthy: critical_ok,
    }
}
