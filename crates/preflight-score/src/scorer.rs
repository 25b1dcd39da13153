//! Readiness scoring.
//!
//! Score = (sum of weights of healthy services) / (sum of all weights),
//! where each service weighs according to its criticality tier.

use preflight_core::{CriticalityWeights, ServiceSpec, Verdicts};

/// Decimal places kept in the reported score.
pub const SCORE_DECIMALS: i32 = 4;

/// Weighted readiness score in `[0, 1]`, rounded to [`SCORE_DECIMALS`].
///
/// A service with no verdict counts as unhealthy. An empty manifest (or
/// one whose weights sum to zero) scores 0.0.
pub fn readiness_score(
    services: &[ServiceSpec],
    verdicts: &Verdicts,
    weights: &CriticalityWeights,
) -> f64 {
    let (healthy, total) = services.iter().fold((0u64, 0u64), |(healthy, total), spec| {
        let weight = u64::from(weights.weight(spec.criticality));
        let is_healthy = verdicts.get(&spec.name).is_some_and(|v| v.is_healthy());
        (healthy + if is_healthy { weight } else { 0 }, total + weight)
    });

    if total == 0 {
        return 0.0;
    }
    round_score(healthy as f64 / total as f64)
}

/// Round to [`SCORE_DECIMALS`] decimal places.
pub fn round_score(score: f64) -> f64 {
    let factor = 10f64.powi(SCORE_DECIMALS);
    (score * factor).round() / factor
}
