use reqwest::header::HeaderMap;
use tokio_util::sync::CancellationToken;

use crate::DispatchError;

/// Input for a single dispatch call.
#[derive(Clone, Debug)]
pub struct RequestSpec {
    /// HTTP method token, e.g. `"GET"`.
    pub method: String,
    pub url: String,
    /// JSON payload, sent only with mutating methods.
    pub body: Option<Vec<u8>>,
    /// Per-call timeout in seconds. `0` keeps the transport's timeout.
    pub timeout_secs: u64,
    /// Total attempts. `0` uses the dispatcher's retry policy.
    pub retry_count: usize,
    /// Aborts in-flight attempts and backoff sleeps when cancelled.
    pub cancel: CancellationToken,
}

impl RequestSpec {
    pub fn new(method: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            body: None,
            timeout_secs: 0,
            retry_count: 0,
            cancel: CancellationToken::new(),
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new("GET", url)
    }

    pub fn post(url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self::new("POST", url).with_body(body)
    }

    pub fn delete(url: impl Into<String>) -> Self {
        Self::new("DELETE", url)
    }

    pub fn with_body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn with_retry_count(mut self, retry_count: usize) -> Self {
        self.retry_count = retry_count;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }
}

/// Terminal outcome of a dispatch call.
///
/// `status` is `0` when no response was received. A timed-out attempt
/// reports a synthesized `408`.
#[derive(Clone, Debug, Default)]
pub struct RequestResult {
    pub status: u16,
    pub body: Vec<u8>,
    pub headers: HeaderMap,
    pub error: Option<DispatchError>,
    /// Attempts sent over the network for this call.
    pub attempts: usize,
}

impl RequestResult {
    /// Builds an error-free result, mostly useful for canned responses.
    pub fn with_status(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            ..Self::default()
        }
    }

    pub(crate) fn failed(status: u16, error: DispatchError) -> Self {
        Self {
            status,
            error: Some(error),
            ..Self::default()
        }
    }

    /// `true` when no error is attached and the status is 2xx.
    pub fn is_success(&self) -> bool {
        self.error.is_none() && (200..300).contains(&self.status)
    }

    pub fn body_text(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
