//! HTTP client capability used by the prober.
//!
//! The prober only needs "GET this service's health endpoint and give me
//! the status code and body". `HttpClient` captures exactly that, and
//! `HyperClient` implements it with a plain HTTP/1.1 connection per probe.

use std::future::Future;
use std::time::Duration;

use bytes::Bytes;
use http_body_util::{BodyExt, Empty, Limited};
use hyper_util::rt::TokioIo;
use thiserror::Error;
use tracing::debug;

use preflight_core::ServiceSpec;

/// Largest health response body the prober will read.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// Status line and body of a completed health request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

/// Reasons a probe got no usable response.
///
/// These never leave the prober; they only end up in debug logs.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("connection failed: {0}")]
    Connect(#[from] std::io::Error),

    #[error("handshake failed: {0}")]
    Handshake(#[source] hyper::Error),

    #[error("invalid request: {0}")]
    InvalidRequest(#[from] http::Error),

    #[error("request failed: {0}")]
    Request(#[source] hyper::Error),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Issues a GET against a service's health endpoint.
pub trait HttpClient: Send + Sync {
    fn get(&self, spec: &ServiceSpec) -> impl Future<Output = Result<RawResponse, ProbeError>> + Send;
}

impl<T: HttpClient> HttpClient for &T {
    fn get(&self, spec: &ServiceSpec) -> impl Future<Output = Result<RawResponse, ProbeError>> + Send {
        (**self).get(spec)
    }
}

/// `HttpClient` over a fresh hyper HTTP/1.1 connection per request.
#[derive(Debug, Clone)]
pub struct HyperClient {
    user_agent: String,
}

impl Default for HyperClient {
    fn default() -> Self {
        Self {
            user_agent: concat!("preflight/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl HyperClient {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HttpClient for HyperClient {
    async fn get(&self, spec: &ServiceSpec) -> Result<RawResponse, ProbeError> {
        let authority = spec.authority();
        let stream = tokio::net::TcpStream::connect((spec.connect_host(), spec.port)).await?;

        let io = TokioIo::new(stream);
        let (mut sender, conn) = hyper::client::conn::http1::handshake(io)
            .await
            .map_err(ProbeError::Handshake)?;

        // Drive the connection in the background.
        tokio::spawn(async move {
            if let Err(e) = conn.await {
                debug!(error = %e, "health probe connection closed with error");
            }
        });

        let req = http::Request::builder()
            .method(http::Method::GET)
            .uri(spec.health_path.as_str())
            .header(http::header::HOST, authority.as_str())
            .header(http::header::USER_AGENT, self.user_agent.as_str())
            .header(http::header::ACCEPT, "application/json, text/plain, */*")
            .body(Empty::<Bytes>::new())?;

        let resp = sender.send_request(req).await.map_err(ProbeError::Request)?;
        let status = resp.status().as_u16();

        // The status line has arrived, so the code stands even when the body
        // is oversized or cut short. An unreadable body is treated as empty.
        let body = match Limited::new(resp.into_body(), MAX_BODY_BYTES).collect().await {
            Ok(collected) => collected.to_bytes(),
            Err(e) => {
                debug!(service = %spec.name, status, error = %e, "health body discarded");
                Bytes::new()
            }
        };

        Ok(RawResponse { status, body })
    }
}
