//! Dependency graph error types.

use thiserror::Error;

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Errors that make a startup order impossible.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("service {service} depends on unknown service {dependency}")]
    UnknownDependency { service: String, dependency: String },

    #[error("cyclic dependency among: {}", .services.join(", "))]
    Cycle {
        /// Services that could not be ordered, in declaration order.
        services: Vec<String>,
    },
}
