//! preflight-health — probes service health endpoints.
//!
//! Issues one HTTP GET per service and turns whatever comes back (or
//! doesn't) into a `HealthVerdict`. Probing never fails: every network
//! failure mode resolves to an unhealthy verdict.
//!
//! # Architecture
//!
//! ```text
//! HealthProber<C: HttpClient>
//!   ├── C::get(spec)            → Result<RawResponse, ProbeError>
//!   ├── tokio::time::timeout    (per probe)
//!   └── classify(outcome)       → HealthVerdict
//! ```
//!
//! `HyperClient` is the default `HttpClient`; tests substitute their own.

pub mod classify;
pub mod client;
pub mod prober;

pub use classify::{HEALTHY_BODY_VALUES, classify};
pub use client::{HttpClient, HyperClient, ProbeError, RawResponse};
pub use prober::HealthProber;
