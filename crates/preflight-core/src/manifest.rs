//! Deployment manifest parser.
//!
//! Only `deployment.services` is authoritative. A top-level `services`
//! key may be present in hand-edited manifests and is ignored.

use std::collections::HashSet;
use std::path::Path;

use http::uri::PathAndQuery;
use serde::Deserialize;

use crate::config::{EvaluatorConfig, ReadinessSection};
use crate::error::{ManifestError, ManifestResult};
use crate::types::Criticality;

/// Host used for services that do not name one.
pub const DEFAULT_HOST: &str = "localhost";

/// A validated service entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSpec {
    pub name: String,
    pub host: String,
    pub port: u16,
    /// Path of the health endpoint, always starting with `/`.
    pub health_path: String,
    pub criticality: Criticality,
    /// Names of services that must start before this one, in declared order.
    pub dependencies: Vec<String>,
}

impl ServiceSpec {
    pub fn new(name: &str, port: u16, health_path: &str, criticality: Criticality) -> Self {
        Self {
            name: name.to_string(),
            host: DEFAULT_HOST.to_string(),
            port,
            health_path: health_path.to_string(),
            criticality,
            dependencies: Vec::new(),
        }
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.to_string();
        self
    }

    pub fn with_dependencies(mut self, deps: &[&str]) -> Self {
        self.dependencies = deps.iter().map(|d| d.to_string()).collect();
        self
    }

    /// Host without IPv6 brackets, as passed to the resolver.
    pub fn connect_host(&self) -> &str {
        self.host
            .strip_prefix('[')
            .and_then(|h| h.strip_suffix(']'))
            .unwrap_or(&self.host)
    }

    /// `host:port` as written in a URL or `Host` header. IPv6 literals
    /// are bracketed.
    pub fn authority(&self) -> String {
        let host = self.connect_host();
        if host.contains(':') {
            format!("[{host}]:{}", self.port)
        } else {
            format!("{host}:{}", self.port)
        }
    }

    /// Full URL of the health endpoint.
    pub fn health_url(&self) -> String {
        format!("http://{}{}", self.authority(), self.health_path)
    }
}

/// Serialization format of a manifest file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestFormat {
    Toml,
    Json,
}

impl ManifestFormat {
    /// `.json` files are JSON; everything else is read as TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// A loaded and validated deployment manifest.
#[derive(Debug, Clone, PartialEq)]
pub struct Manifest {
    pub deployment_name: String,
    /// Services in declaration order.
    pub services: Vec<ServiceSpec>,
    pub config: EvaluatorConfig,
}

// Raw file shape. Unknown keys (including the decoy top-level
// `services`) are ignored by serde.
#[derive(Debug, Deserialize)]
struct ManifestFile {
    deployment: Option<DeploymentSection>,
    readiness: Option<ReadinessSection>,
}

#[derive(Debug, Deserialize)]
struct DeploymentSection {
    name: Option<String>,
    services: Option<Vec<ServiceEntry>>,
}

#[derive(Debug, Deserialize)]
struct ServiceEntry {
    name: String,
    host: Option<String>,
    port: i64,
    health_endpoint: String,
    criticality: Criticality,
    #[serde(default)]
    dependencies: Vec<String>,
}

impl Manifest {
    pub fn new(deployment_name: &str, services: Vec<ServiceSpec>) -> Self {
        Self {
            deployment_name: deployment_name.to_string(),
            services,
            config: EvaluatorConfig::default(),
        }
    }

    pub fn from_file(path: &Path) -> ManifestResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content, ManifestFormat::from_path(path))
    }

    pub fn parse(content: &str, format: ManifestFormat) -> ManifestResult<Self> {
        let file: ManifestFile = match format {
            ManifestFormat::Toml => {
                toml::from_str(content).map_err(|e| ManifestError::Parse(e.to_string()))?
            }
            ManifestFormat::Json => {
                serde_json::from_str(content).map_err(|e| ManifestError::Parse(e.to_string()))?
            }
        };
        Self::from_raw(file)
    }

    fn from_raw(file: ManifestFile) -> ManifestResult<Self> {
        let deployment = file
            .deployment
            .ok_or(ManifestError::MissingKey("deployment"))?;
        let deployment_name = deployment
            .name
            .filter(|n| !n.trim().is_empty())
            .ok_or(ManifestError::MissingKey("deployment.name"))?;
        let entries = deployment
            .services
            .ok_or(ManifestError::MissingKey("deployment.services"))?;

        let mut seen = HashSet::new();
        let mut services = Vec::with_capacity(entries.len());
        for (index, entry) in entries.into_iter().enumerate() {
            let spec = validate_entry(index, entry)?;
            if !seen.insert(spec.name.clone()) {
                return Err(ManifestError::DuplicateService(spec.name));
            }
            services.push(spec);
        }

        let config = file.readiness.unwrap_or_default().into_config()?;

        Ok(Self {
            deployment_name,
            services,
            config,
        })
    }

    pub fn service(&self, name: &str) -> Option<&ServiceSpec> {
        self.services.iter().find(|s| s.name == name)
    }
}

fn validate_entry(index: usize, entry: ServiceEntry) -> ManifestResult<ServiceSpec> {
    let name = entry.name.trim().to_string();
    if name.is_empty() {
        return Err(ManifestError::EmptyName { index });
    }

    let port = u16::try_from(entry.port)
        .ok()
        .filter(|p| *p != 0)
        .ok_or_else(|| ManifestError::InvalidPort {
            service: name.clone(),
            port: entry.port,
        })?;

    // Must be a valid origin-form request target, not just slash-prefixed.
    let valid_path = entry.health_endpoint.starts_with('/')
        && entry.health_endpoint.parse::<PathAndQuery>().is_ok();
    if !valid_path {
        return Err(ManifestError::InvalidHealthPath {
            service: name,
            path: entry.health_endpoint,
        });
    }

    Ok(ServiceSpec {
        name,
        host: entry
            .host
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_HOST.to_string()),
        port,
        health_path: entry.health_endpoint,
        criticality: entry.criticality,
        dependencies: entry.dependencies,
    })
}
