//! Report assembly. Pure composition, no decisions.

use chrono::{DateTime, Utc};

use preflight_core::{ReadinessReport, Verdicts};
use preflight_score::Resolution;

/// Package the outputs of one run into its report.
pub fn assemble(
    deployment_name: &str,
    readiness_score: f64,
    resolution: Resolution,
    service_statuses: Verdicts,
    startup_order: Vec<String>,
    timestamp: DateTime<Utc>,
) -> ReadinessReport {
    ReadinessReport {
        deployment_name: deployment_name.to_string(),
        overall_status: resolution.overall_status,
        readiness_score,
        service_statuses,
        startup_order,
        critical_services_healthy: resolution.critical_services_healthy,
        timestamp,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use preflight_core::{Criticality, HealthVerdict, OverallStatus};

    #[test]
    fn copies_every_field() {
        let mut verdicts = Verdicts::new();
        verdicts.insert("db".to_string(), HealthVerdict::unhealthy(0, Criticality::High));
        let now = Utc::now();

        let report = assemble(
            "prod",
            0.0,
            Resolution {
                overall_status: OverallStatus::Critical,
                critical_services_healthy: false,
            },
            verdicts.clone(),
            vec!["db".to_string()],
            now,
        );

        assert_eq!(report.deployment_name, "prod");
        assert_eq!(report.overall_status, OverallStatus::Critical);
        assert_eq!(report.readiness_score, 0.0);
        assert_eq!(report.service_statuses, verdicts);
        assert_eq!(report.startup_order, ["db"]);
        assert!(!report.critical_services_healthy);
        assert_eq!(report.timestamp, now);
    }

    #[test]
    fn serialized_report_has_all_top_level_keys() {
        let report = assemble(
            "prod",
            1.0,
            Resolution {
                overall_status: OverallStatus::Healthy,
                critical_services_healthy: true,
            },
            Verdicts::new(),
            Vec::new(),
            Utc::now(),
        );
        let json = serde_json::to_value(&report).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        for key in [
            "deployment_name",
            "overall_status",
            "readiness_score",
            "service_statuses",
            "startup_order",
            "critical_services_healthy",
            "timestamp",
        ] {
            assert!(keys.iter().any(|k| k == key), "missing {key}");
        }
        assert_eq!(keys.len(), 7);
    }
}
