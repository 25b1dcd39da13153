//! preflight-core — shared model for the deployment readiness evaluator.
//!
//! Holds the manifest model (`ServiceSpec`), the per-run value types
//! (`HealthVerdict`, `ReadinessReport`), and the evaluator configuration
//! (weights, thresholds, probe timeout) read from the manifest.

pub mod config;
pub mod error;
pub mod manifest;
pub mod types;

pub use config::{CriticalityWeights, EvaluatorConfig, StatusThresholds};
pub use error::{ManifestError, ManifestResult};
pub use manifest::{Manifest, ManifestFormat, ServiceSpec};
pub use types::*;
