//! preflight-report — one evaluation pass, from manifest to report.
//!
//! # Pipeline
//!
//! ```text
//! Manifest
//!   ├── preflight_graph::startup_order   → Vec<String>   (fails on cycles)
//!   ├── HealthProber::probe_all          → Verdicts      (never fails)
//!   │      ── all probes resolved ──
//!   ├── preflight_score::readiness_score → f64
//!   ├── preflight_score::resolve         → Resolution
//!   └── assemble                         → ReadinessReport
//! ```

pub mod assemble;
pub mod error;
pub mod evaluate;
pub mod format;

pub use assemble::assemble;
pub use error::{EvaluationError, EvaluationResult};
pub use evaluate::Evaluator;
pub use format::{format_report, to_json, write_report};
