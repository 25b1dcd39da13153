//! Evaluation error types.

use std::path::PathBuf;

use thiserror::Error;

use preflight_core::ManifestError;
use preflight_graph::GraphError;

/// Result type alias for evaluation runs.
pub type EvaluationResult<T> = Result<T, EvaluationError>;

/// Fatal conditions of an evaluation run. Probe failures are never
/// errors; they become unhealthy verdicts.
#[derive(Debug, Error)]
pub enum EvaluationError {
    #[error("manifest error: {0}")]
    Manifest(#[from] ManifestError),

    #[error("dependency graph error: {0}")]
    Graph(#[from] GraphError),

    #[error("failed to serialize report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write report to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
