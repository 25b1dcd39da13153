//! End-to-end evaluation against in-process mock services.
//!
//! Five services, each on its own port:
//!
//! ```text
//! auth-service         /health  200 {"status": "ok"}
//! api-gateway          /health  200 {"status": "healthy"}
//! cache-service        /ping    200 pong
//! worker-service       /status  200 {"status": "degraded"}
//! notification-service /health  200 {"status": "ok"}
//! ```

use std::net::SocketAddr;

use bytes::Bytes;
use http_body_util::Full;
use hyper::body::Incoming;
use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper::{Request, Response};
use hyper_util::rt::TokioIo;
use tokio::net::TcpListener;

use preflight_core::{HealthStatus, OverallStatus, ReadinessReport};
use preflight_health::HyperClient;
use preflight_report::{EvaluationError, Evaluator, write_report};

/// One mock service answering `body` on `path` and 404 elsewhere.
async fn spawn_service(path: &'static str, body: &'static str) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            tokio::spawn(async move {
                let svc = service_fn(move |req: Request<Incoming>| async move {
                    let (status, body) = if req.uri().path() == path {
                        (200, body)
                    } else {
                        (404, "not found")
                    };
                    Ok::<_, hyper::Error>(
                        Response::builder()
                            .status(status)
                            .body(Full::new(Bytes::from(body)))
                            .unwrap(),
                    )
                });
                let _ = http1::Builder::new()
                    .serve_connection(TokioIo::new(stream), svc)
                    .await;
            });
        }
    });

    addr
}

struct Stack {
    auth: u16,
    gateway: u16,
    cache: u16,
    worker: u16,
    notification: u16,
}

async fn spawn_stack() -> Stack {
    Stack {
        auth: spawn_service("/health", r#"{"status": "ok", "version": "2.1.0"}"#)
            .await
            .port(),
        gateway: spawn_service("/health", r#"{"status": "healthy", "uptime_seconds": 3601}"#)
            .await
            .port(),
        cache: spawn_service("/ping", "pong").await.port(),
        worker: spawn_service("/status", r#"{"status": "degraded", "queue_depth": 1482}"#)
            .await
            .port(),
        notification: spawn_service("/health", r#"{"status": "ok", "pending_notifications": 0}"#)
            .await
            .port(),
    }
}

fn manifest_toml(stack: &Stack) -> String {
    format!(
        r#"
# Stale list kept around for reference; not authoritative.
[[services]]
name = "legacy-service"
port = 1
health_endpoint = "/health"
criticality = "high"

[deployment]
name = "production-stack"

[[deployment.services]]
name = "auth-service"
host = "127.0.0.1"
port = {auth}
health_endpoint = "/health"
criticality = "high"

[[deployment.services]]
name = "api-gateway"
host = "127.0.0.1"
port = {gateway}
health_endpoint = "/health"
criticality = "high"
dependencies = ["auth-service", "cache-service"]

[[deployment.services]]
name = "cache-service"
host = "127.0.0.1"
port = {cache}
health_endpoint = "/ping"
criticality = "medium"

[[deployment.services]]
name = "worker-service"
host = "127.0.0.1"
port = {worker}
health_endpoint = "/status"
criticality = "low"
dependencies = ["api-gateway"]

[[deployment.services]]
name = "notification-service"
host = "127.0.0.1"
port = {notification}
health_endpoint = "/health"
criticality = "low"
dependencies = ["worker-service"]

[readiness]
probe_timeout = "2s"
"#,
        auth = stack.auth,
        gateway = stack.gateway,
        cache = stack.cache,
        worker = stack.worker,
        notification = stack.notification,
    )
}

fn index(report: &ReadinessReport, name: &str) -> usize {
    report.startup_order.iter().position(|n| n == name).unwrap()
}

#[tokio::test]
async fn production_stack_report() {
    let stack = spawn_stack().await;
    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("deployment.toml");
    std::fs::write(&manifest_path, manifest_toml(&stack)).unwrap();

    let report = Evaluator::new(HyperClient::new())
        .evaluate_path(&manifest_path)
        .await
        .unwrap();

    assert_eq!(report.deployment_name, "production-stack");
    assert_eq!(report.service_statuses.len(), 5);
    assert!(!report.service_statuses.contains_key("legacy-service"));

    for name in ["auth-service", "api-gateway", "cache-service", "notification-service"] {
        let verdict = &report.service_statuses[name];
        assert_eq!(verdict.status, HealthStatus::Healthy, "{name}");
        assert_eq!(verdict.http_status, 200, "{name}");
    }
    let worker = &report.service_statuses["worker-service"];
    assert_eq!(worker.status, HealthStatus::Unhealthy);
    assert_eq!(worker.http_status, 200);

    assert!((report.readiness_score - 0.9).abs() < 0.001);
    assert!(report.critical_services_healthy);
    assert_eq!(report.overall_status, OverallStatus::Degraded);

    assert_eq!(report.startup_order.len(), 5);
    assert!(index(&report, "auth-service") < index(&report, "api-gateway"));
    assert!(index(&report, "cache-service") < index(&report, "api-gateway"));
    assert!(index(&report, "api-gateway") < index(&report, "worker-service"));
    assert!(index(&report, "worker-service") < index(&report, "notification-service"));
}

#[tokio::test]
async fn written_report_matches_schema() {
    let stack = spawn_stack().await;
    let dir = tempfile::tempdir().unwrap();
    let manifest_path = dir.path().join("deployment.toml");
    let report_path = dir.path().join("deployment_report.json");
    std::fs::write(&manifest_path, manifest_toml(&stack)).unwrap();

    let report = Evaluator::new(HyperClient::new())
        .evaluate_path(&manifest_path)
        .await
        .unwrap();
    write_report(&report, &report_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["overall_status"], "degraded");
    assert_eq!(json["critical_services_healthy"], true);
    assert_eq!(json["service_statuses"]["cache-service"]["criticality"], "medium");
    assert_eq!(json["service_statuses"]["worker-service"]["status"], "unhealthy");
    assert_eq!(json["startup_order"].as_array().unwrap().len(), 5);

    let ts = json["timestamp"].as_str().unwrap();
    assert!(ts.ends_with("+00:00"), "timestamp {ts} lacks UTC offset");
    assert!(chrono::DateTime::parse_from_rfc3339(ts).is_ok());
}

#[tokio::test]
async fn stopped_high_service_makes_deployment_critical() {
    let stack = spawn_stack().await;
    // Point auth-service at a port nothing listens on.
    let closed = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed_port = closed.local_addr().unwrap().port();
    drop(closed);

    let manifest = manifest_toml(&Stack {
        auth: closed_port,
        ..stack
    });
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deployment.toml");
    std::fs::write(&path, manifest).unwrap();

    let report = Evaluator::new(HyperClient::new()).evaluate_path(&path).await.unwrap();
    assert_eq!(report.service_statuses["auth-service"].http_status, 0);
    assert!(!report.critical_services_healthy);
    assert_eq!(report.overall_status, OverallStatus::Critical);
}

#[tokio::test]
async fn malformed_manifest_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("deployment.json");
    std::fs::write(
        &path,
        r#"{"deployment": {"name": "x", "services": [{"name": "a", "port": "eighty"}]}}"#,
    )
    .unwrap();

    let err = Evaluator::new(HyperClient::new()).evaluate_path(&path).await.unwrap_err();
    assert!(matches!(err, EvaluationError::Manifest(_)));
}
