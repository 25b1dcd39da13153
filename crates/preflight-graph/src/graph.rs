//! Dependency graph and startup ordering.

use std::collections::{HashMap, VecDeque};

use tracing::{debug, warn};

use preflight_core::ServiceSpec;

use crate::error::{GraphError, GraphResult};

/// "`dependent` cannot start until `dependency` has."
///
/// In the graph this is stored as an edge `dependency → dependent`, so a
/// service with no dependencies has in-degree 0 and is eligible first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependsOn {
    pub dependent: String,
    pub dependency: String,
}

/// Directed graph over the services of one manifest.
#[derive(Debug, Clone)]
pub struct DependencyGraph {
    /// Service names in declaration order; a node's index is its position.
    names: Vec<String>,
    edges: Vec<DependsOn>,
    /// `dependency index → dependent indices`, in declaration order.
    dependents: Vec<Vec<usize>>,
    /// Number of declared dependencies per service.
    in_degree: Vec<usize>,
}

impl DependencyGraph {
    /// Build the graph from declared dependencies.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::UnknownDependency`] if a service names a
    /// dependency that is not in `services`.
    pub fn build(services: &[ServiceSpec]) -> GraphResult<Self> {
        let index: HashMap<&str, usize> = services
            .iter()
            .enumerate()
            .map(|(i, s)| (s.name.as_str(), i))
            .collect();

        let mut graph = Self {
            names: services.iter().map(|s| s.name.clone()).collect(),
            edges: Vec::new(),
            dependents: vec![Vec::new(); services.len()],
            in_degree: vec![0; services.len()],
        };

        for (dependent_idx, service) in services.iter().enumerate() {
            for dependency in &service.dependencies {
                let dependency_idx =
                    *index
                        .get(dependency.as_str())
                        .ok_or_else(|| GraphError::UnknownDependency {
                            service: service.name.clone(),
                            dependency: dependency.clone(),
                        })?;
                graph.add_edge(
                    DependsOn {
                        dependent: service.name.clone(),
                        dependency: dependency.clone(),
                    },
                    dependency_idx,
                    dependent_idx,
                );
            }
        }

        Ok(graph)
    }

    fn add_edge(&mut self, edge: DependsOn, dependency_idx: usize, dependent_idx: usize) {
        self.dependents[dependency_idx].push(dependent_idx);
        self.in_degree[dependent_idx] += 1;
        self.edges.push(edge);
    }

    pub fn node_count(&self) -> usize {
        self.names.len()
    }

    pub fn edges(&self) -> &[DependsOn] {
        &self.edges
    }

    /// Startup order via Kahn's algorithm.
    ///
    /// Services that become eligible at the same time keep their
    /// declaration order (stable FIFO).
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Cycle`] if not every service can be ordered.
    pub fn startup_order(&self) -> GraphResult<Vec<String>> {
        let mut in_degree = self.in_degree.clone();
        let mut queue: VecDeque<usize> = (0..self.names.len())
            .filter(|&idx| in_degree[idx] == 0)
            .collect();

        let mut order = Vec::with_capacity(self.names.len());
        while let Some(idx) = queue.pop_front() {
            order.push(self.names[idx].clone());

            for &dependent in &self.dependents[idx] {
                in_degree[dependent] -= 1;
                if in_degree[dependent] == 0 {
                    queue.push_back(dependent);
                }
            }
        }

        if order.len() != self.names.len() {
            let stuck: Vec<String> = in_degree
                .iter()
                .enumerate()
                .filter(|(_, deg)| **deg > 0)
                .map(|(idx, _)| self.names[idx].clone())
                .collect();
            warn!(services = ?stuck, "dependency cycle detected");
            return Err(GraphError::Cycle { services: stuck });
        }

        debug!(order = ?order, "startup order computed");
        Ok(order)
    }
}

/// Build the graph for `services` and return its startup order.
pub fn startup_order(services: &[ServiceSpec]) -> GraphResult<Vec<String>> {
    DependencyGraph::build(services)?.startup_order()
}
