//! preflight-score — weighted readiness score and status resolution.
//!
//! - **`scorer`** — criticality-weighted share of healthy services
//! - **`resolver`** — high-criticality gate plus score thresholds, mapped
//!   onto `OverallStatus`

pub mod resolver;
pub mod scorer;

pub use resolver::{Resolution, critical_services_healthy, resolve, resolve_status};
pub use scorer::{SCORE_DECIMALS, readiness_score, round_score};
