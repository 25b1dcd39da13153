//! preflight-graph — dependency-respecting startup order.
//!
//! Declared dependencies become [`DependsOn`] edges; [`DependencyGraph`]
//! orders services with Kahn's algorithm so that every dependency starts
//! before the services that declare it. Cycles and unknown dependency
//! names are reported as [`GraphError`]s, never as a partial order.

pub mod error;
pub mod graph;

pub use error::{GraphError, GraphResult};
pub use graph::{DependencyGraph, DependsOn, startup_order};
