//! HTTP client abstraction for testability

use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace, warn};

use super::transfer::TransportError;
use crate::config::DEFAULT_NETWORK_TIMEOUT_SECS;
use crate::route::{HttpMethod, RequestDescriptor};

/// User-Agent sent with every request.
const USER_AGENT: &str = concat!("netlane/", env!("CARGO_PKG_VERSION"));

/// Trait for synchronous HTTP transfers.
///
/// Implementations block the calling thread, so they are only ever driven
/// from a scheduler lane.
pub trait HttpClient: Send + Sync {
    /// Performs the request described by `request`.
    ///
    /// # Arguments
    ///
    /// * `request` - URL, method, headers and body to send
    ///
    /// # Returns
    ///
    /// The response body, or why there is none. A non-success status with
    /// a non-empty body still returns the body, so server error JSON
    /// reaches the response processor.
    fn execute(&self, request: &RequestDescriptor) -> Result<Vec<u8>, TransportError>;
}

/// Trait for asynchronous HTTP transfers.
pub trait AsyncHttpClient: Send + Sync {
    /// Performs the request described by `request`.
    ///
    /// Same contract as [`HttpClient::execute`].
    fn execute(
        &self,
        request: &RequestDescriptor,
    ) -> impl Future<Output = Result<Vec<u8>, TransportError>> + Send;
}

/// Blocking HTTP client built on `reqwest::blocking`.
#[derive(Clone)]
pub struct ReqwestClient {
    client: reqwest::blocking::Client,
}

impl ReqwestClient {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_NETWORK_TIMEOUT_SECS)
    }

    /// Creates a client with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl HttpClient for ReqwestClient {
    fn execute(&self, request: &RequestDescriptor) -> Result<Vec<u8>, TransportError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method()), request.url().clone());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = builder
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = response.status();

        let body = response
            .bytes()
            .map(|b| b.to_vec())
            .map_err(|e| TransportError::Body(e.to_string()))?;

        check_status(request, status, body)
    }
}

/// Non-blocking HTTP client built on `reqwest`.
///
/// Futures must be polled on a tokio runtime.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client with the default timeout.
    pub fn new() -> Result<Self, TransportError> {
        Self::with_timeout(DEFAULT_NETWORK_TIMEOUT_SECS)
    }

    /// Creates a client with a custom timeout.
    pub fn with_timeout(timeout_secs: u64) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .user_agent(USER_AGENT)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_nodelay(true)
            .build()
            .map_err(|e| TransportError::Client(e.to_string()))?;

        Ok(Self { client })
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn execute(&self, request: &RequestDescriptor) -> Result<Vec<u8>, TransportError> {
        let url = request.url().as_str();
        trace!(url = url, method = %request.method(), "HTTP request starting");

        let mut builder = self
            .client
            .request(to_reqwest_method(request.method()), request.url().clone());
        for (name, value) in request.headers() {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = request.body() {
            builder = builder.body(body.to_vec());
        }

        let response = match builder.send().await {
            Ok(resp) => {
                debug!(url = url, status = resp.status().as_u16(), "HTTP response received");
                resp
            }
            Err(e) => {
                warn!(
                    url = url,
                    error = %e,
                    is_connect = e.is_connect(),
                    is_timeout = e.is_timeout(),
                    "HTTP request failed"
                );
                return Err(TransportError::Request(e.to_string()));
            }
        };
        let status = response.status();

        let body = match response.bytes().await {
            Ok(bytes) => {
                trace!(url = url, bytes = bytes.len(), "HTTP response body read");
                bytes.to_vec()
            }
            Err(e) => {
                warn!(url = url, error = %e, "Failed to read response body");
                return Err(TransportError::Body(e.to_string()));
            }
        };

        check_status(request, status, body)
    }
}

fn to_reqwest_method(method: HttpMethod) -> reqwest::Method {
    match method {
        HttpMethod::Get => reqwest::Method::GET,
        HttpMethod::Post => reqwest::Method::POST,
    }
}

fn check_status(
    request: &RequestDescriptor,
    status: reqwest::StatusCode,
    body: Vec<u8>,
) -> Result<Vec<u8>, TransportError> {
    if status.is_success() {
        return Ok(body);
    }
    if body.is_empty() {
        warn!(url = request.url().as_str(), status = status.as_u16(), "HTTP error status");
        return Err(TransportError::Status {
            status: status.as_u16(),
        });
    }
    warn!(
        url = request.url().as_str(),
        status = status.as_u16(),
        bytes = body.len(),
        "HTTP error status, delivering body"
    );
    Ok(body)
}
