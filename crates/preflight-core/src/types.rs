//! Value types produced by an evaluation run.
//!
//! Every value here is created fresh for one run and never mutated
//! afterwards. All types serialize to the JSON shape of the readiness
//! report.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Verdicts for one run, keyed by service name.
pub type Verdicts = BTreeMap<String, HealthVerdict>;

// ── Criticality ────────────────────────────────────────────────────

/// How much a service matters to the deployment as a whole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Criticality {
    High,
    Medium,
    Low,
}

impl Criticality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for Criticality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ── Health verdict ─────────────────────────────────────────────────

/// Binary health outcome of a single probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
    Healthy,
    Unhealthy,
}

impl HealthStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Unhealthy => "unhealthy",
        }
    }
}

impl fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Classified result of probing one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthVerdict {
    pub status: HealthStatus,
    /// HTTP status code of the response, or 0 when no response arrived.
    pub http_status: u16,
    /// Copied from the service spec.
    pub criticality: Criticality,
}

impl HealthVerdict {
    pub fn healthy(http_status: u16, criticality: Criticality) -> Self {
        Self {
            status: HealthStatus::Healthy,
            http_status,
            criticality,
        }
    }

    pub fn unhealthy(http_status: u16, criticality: Criticality) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            http_status,
            criticality,
        }
    }

    /// Verdict for a probe that never got a response.
    pub fn unreachable(criticality: Criticality) -> Self {
        Self::unhealthy(0, criticality)
    }

    pub fn is_healthy(&self) -> bool {
        self.status == HealthStatus::Healthy
    }
}

// ── Overall status ─────────────────────────────────────────────────

/// Deployment-wide readiness status.
///
/// Variants are declared in increasing severity, so `Ord` compares how
/// bad a status is: `Healthy < Degraded < NotReady < Critical`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverallStatus {
    Healthy,
    Degraded,
    NotReady,
    Critical,
}

impl OverallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Healthy => "healthy",
            Self::Degraded => "degraded",
            Self::NotReady => "not_ready",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for OverallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

// ── Report ─────────────────────────────────────────────────────────

/// Terminal output of one evaluation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessReport {
    pub deployment_name: String,
    pub overall_status: OverallStatus,
    /// Weighted share of healthy services, in `[0, 1]`, 4 decimals.
    pub readiness_score: f64,
    pub service_statuses: Verdicts,
    pub startup_order: Vec<String>,
    pub critical_services_healthy: bool,
    /// Capture time, serialized as RFC 3339 with an explicit `+00:00` offset.
    #[serde(with = "rfc3339_utc")]
    pub timestamp: DateTime<Utc>,
}

mod rfc3339_utc {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, ser: S) -> Result<S::Ok, S::Error> {
        ser.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Micros, false))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(de)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
