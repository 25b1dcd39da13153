//! Turns a probe outcome into a health verdict.
//!
//! HTTP 200 is necessary but not sufficient: a service can answer 200
//! while reporting a degraded internal state in its JSON body.

use serde_json::Value;

use preflight_core::{Criticality, HealthVerdict};

use crate::client::{ProbeError, RawResponse};

/// Body field carrying the service's self-reported status.
pub const STATUS_FIELD: &str = "status";

/// Value assumed when a JSON body has no `status` field.
pub const DEFAULT_BODY_STATUS: &str = "ok";

/// `status` values that count as healthy. Matched exactly.
pub const HEALTHY_BODY_VALUES: [&str; 3] = ["ok", "up", "healthy"];

/// Classify the outcome of one probe.
///
/// - no response (connect, timeout, transport error) → unhealthy, status 0
/// - any status other than 200 → unhealthy, body ignored
/// - 200 → healthy unless the body is a JSON object whose `status`
///   is not one of [`HEALTHY_BODY_VALUES`]
pub fn classify(outcome: &Result<RawResponse, ProbeError>, criticality: Criticality) -> HealthVerdict {
    let resp = match outcome {
        Ok(resp) => resp,
        Err(_) => return HealthVerdict::unreachable(criticality),
    };

    if resp.status != 200 {
        return HealthVerdict::unhealthy(resp.status, criticality);
    }

    if body_reports_healthy(&resp.body) {
        HealthVerdict::healthy(resp.status, criticality)
    } else {
        HealthVerdict::unhealthy(resp.status, criticality)
    }
}

/// Whether a 200 body reports the service as healthy.
///
/// Bodies that are not a JSON object (plain text, malformed JSON, JSON
/// arrays or scalars) carry no status field, so the 200 alone decides.
pub fn body_reports_healthy(body: &[u8]) -> bool {
    let map = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => map,
        _ => return true,
    };

    match map.get(STATUS_FIELD) {
        None => HEALTHY_BODY_VALUES.contains(&DEFAULT_BODY_STATUS),
        Some(Value::String(s)) => HEALTHY_BODY_VALUES.contains(&s.as_str()),
        Some(_) => false,
    }
}
