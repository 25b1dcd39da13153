//! Evaluator configuration: probe timeout, criticality weights, and
//! status thresholds.
//!
//! All of it can be overridden from the optional `[readiness]` section
//! of the manifest; anything left out falls back to the defaults.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ManifestError, ManifestResult};
use crate::types::Criticality;

/// Probe timeout used when the manifest does not set one.
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Weight of each criticality tier in the readiness score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CriticalityWeights {
    pub high: u32,
    pub medium: u32,
    pub low: u32,
}

impl Default for CriticalityWeights {
    fn default() -> Self {
        Self {
            high: 3,
            medium: 2,
            low: 1,
        }
    }
}

impl CriticalityWeights {
    pub fn weight(&self, criticality: Criticality) -> u32 {
        match criticality {
            Criticality::High => self.high,
            Criticality::Medium => self.medium,
            Criticality::Low => self.low,
        }
    }
}

/// Score thresholds for the `healthy` and `degraded` statuses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusThresholds {
    /// Minimum score for `healthy`.
    pub healthy: f64,
    /// Minimum score for `degraded`.
    pub degraded: f64,
}

impl Default for StatusThresholds {
    fn default() -> Self {
        Self {
            healthy: 0.95,
            degraded: 0.70,
        }
    }
}

impl StatusThresholds {
    /// Thresholds must satisfy `0 <= degraded <= healthy <= 1`.
    pub fn validate(&self) -> ManifestResult<()> {
        let in_range = |v: f64| (0.0..=1.0).contains(&v);
        if !in_range(self.healthy) || !in_range(self.degraded) || self.degraded > self.healthy {
            return Err(ManifestError::InvalidConfig(format!(
                "thresholds must satisfy 0 <= degraded ({}) <= healthy ({}) <= 1",
                self.degraded, self.healthy
            )));
        }
        Ok(())
    }
}

/// Settings for one evaluation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluatorConfig {
    pub probe_timeout: Duration,
    pub weights: CriticalityWeights,
    pub thresholds: StatusThresholds,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            weights: CriticalityWeights::default(),
            thresholds: StatusThresholds::default(),
        }
    }
}

/// `[readiness]` section as written in the manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ReadinessSection {
    pub probe_timeout: Option<String>,
    pub weights: Option<CriticalityWeights>,
    pub thresholds: Option<StatusThresholds>,
}

impl ReadinessSection {
    pub(crate) fn into_config(self) -> ManifestResult<EvaluatorConfig> {
        let probe_timeout = match self.probe_timeout {
            Some(raw) => parse_duration(&raw).ok_or_else(|| {
                ManifestError::InvalidConfig(format!("unparseable probe_timeout {raw:?}"))
            })?,
            None => DEFAULT_PROBE_TIMEOUT,
        };
        if probe_timeout.is_zero() {
            return Err(ManifestError::InvalidConfig(
                "probe_timeout must be greater than zero".to_string(),
            ));
        }

        let thresholds = self.thresholds.unwrap_or_default();
        thresholds.validate()?;

        Ok(EvaluatorConfig {
            probe_timeout,
            weights: self.weights.unwrap_or_default(),
            thresholds,
        })
    }
}

/// Parse a duration string like "5s", "500ms", "1m".
///
/// A bare number is read as seconds.
pub fn parse_duration(s: &str) -> Option<Duration> {
    let s = s.trim();
    if let Some(ms) = s.strip_suffix("ms") {
        ms.trim().parse::<u64>().ok().map(Duration::from_millis)
    } else if let Some(secs) = s.strip_suffix('s') {
        secs.trim().parse::<u64>().ok().map(Duration::from_secs)
    } else if let Some(mins) = s.strip_suffix('m') {
        mins.trim()
            .parse::<u64>()
            .ok()
            .map(|m| Duration::from_secs(m * 60))
    } else {
        s.parse::<u64>().ok().map(Duration::from_secs)
    }
}
