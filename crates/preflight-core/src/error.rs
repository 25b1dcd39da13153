//! Manifest error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias for manifest loading.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors raised while loading or validating a deployment manifest.
///
/// All of these are fatal: they are reported before any probe is issued.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse manifest: {0}")]
    Parse(String),

    #[error("manifest is missing required key `{0}`")]
    MissingKey(&'static str),

    #[error("service #{index}: name must not be empty")]
    EmptyName { index: usize },

    #[error("duplicate service name: {0}")]
    DuplicateService(String),

    #[error("service {service}: port {port} is outside 1-65535")]
    InvalidPort { service: String, port: i64 },

    #[error("service {service}: health endpoint {path:?} must start with '/'")]
    InvalidHealthPath { service: String, path: String },

    #[error("invalid readiness config: {0}")]
    InvalidConfig(String),
}
