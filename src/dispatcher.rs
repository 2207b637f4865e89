use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header, Method};
use tokio::time::sleep;

use crate::{
    ApiError, DispatchError, RequestResult, RequestSpec, Result, RetryPolicy, TransportConfig,
};

/// Executes a [`RequestSpec`] and reports its terminal [`RequestResult`].
///
/// Implementations never fail outright; every outcome, including a request
/// that could not be built, is carried inside the result.
#[async_trait]
pub trait Dispatch: Send + Sync {
    async fn dispatch(&self, spec: RequestSpec) -> RequestResult;
}

/// Reqwest-backed dispatcher with exponential-backoff retries.
///
/// Cloning is cheap and clones share one connection pool.
#[derive(Clone, Debug)]
pub struct HttpDispatcher {
    http: reqwest::Client,
    policy: RetryPolicy,
}

impl HttpDispatcher {
    /// Creates a dispatcher over the default transport settings.
    pub fn new() -> Result<Self> {
        Self::from_config(&TransportConfig::default())
    }

    pub fn from_config(config: &TransportConfig) -> Result<Self> {
        let http = config.build_client().map_err(ApiError::Transport)?;
        Ok(Self::with_client(http))
    }

    /// Wraps a caller-configured client. No transport defaults are applied.
    pub fn with_client(http: reqwest::Client) -> Self {
        Self {
            http,
            policy: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.policy
    }

    fn build_request(
        &self,
        spec: &RequestSpec,
    ) -> std::result::Result<reqwest::Request, DispatchError> {
        let method = Method::from_bytes(spec.method.as_bytes()).map_err(|err| {
            DispatchError::Build(format!("invalid method {:?}: {err}", spec.method))
        })?;
        let mutating = is_mutating(&method);
        let mut builder = self.http.request(method, spec.url.as_str());

        // Scoped to this request; the shared client keeps its own timeout.
        if spec.timeout_secs != 0 {
            builder = builder.timeout(Duration::from_secs(spec.timeout_secs));
        }

        if let Some(body) = spec.body.as_ref().filter(|body| mutating && !body.is_empty()) {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        builder
            .build()
            .map_err(|err| DispatchError::Build(err.to_string()))
    }

    async fn send_once(&self, request: reqwest::Request) -> RequestResult {
        let response = match self.http.execute(request).await {
            Ok(response) => response,
            Err(err) => {
                let error = DispatchError::from_send(&err);
                let status = match error {
                    DispatchError::Timeout(_) => 408,
                    _ => 0,
                };
                return RequestResult::failed(status, error);
            }
        };

        let status = response.status().as_u16();
        let headers = response.headers().clone();
        match response.bytes().await {
            Ok(body) => RequestResult {
                status,
                body: body.to_vec(),
                headers,
                ..RequestResult::default()
            },
            Err(err) => RequestResult {
                status,
                headers,
                error: Some(DispatchError::ReadBody(err.to_string())),
                ..RequestResult::default()
            },
        }
    }

    fn should_retry(&self, result: &RequestResult) -> bool {
        result.error.is_some() || self.policy.is_retryable(result.status)
    }
}

#[async_trait]
impl Dispatch for HttpDispatcher {
    async fn dispatch(&self, spec: RequestSpec) -> RequestResult {
        let request = match self.build_request(&spec) {
            Ok(request) => request,
            Err(error) => return RequestResult::failed(0, error),
        };

        let retry_count = match spec.retry_count {
            0 => self.policy.retry_count,
            count => count,
        }
        .max(1);
        let mut backoff = self.policy.backoff();
        let mut last: Option<RequestResult> = None;
        let mut attempt = 1usize;

        loop {
            if spec.cancel.is_cancelled() {
                return cancelled(last, attempt - 1);
            }

            let Some(request) = request.try_clone() else {
                return RequestResult::failed(
                    0,
                    DispatchError::Build("request body cannot be replayed".to_owned()),
                );
            };

            let outcome = tokio::select! {
                biased;
                _ = spec.cancel.cancelled() => None,
                result = self.send_once(request) => Some(result),
            };
            let Some(mut result) = outcome else {
                return cancelled(last, attempt);
            };
            result.attempts = attempt;

            if !self.should_retry(&result) || attempt >= retry_count {
                return result;
            }

            let delay = backoff.next().unwrap_or(Duration::MAX);

            #[cfg(feature = "tracing")]
            tracing::debug!(
                attempt,
                status = result.status,
                delay_ms = millis(delay),
                "retrying {} {}",
                spec.method,
                spec.url
            );

            let interrupted = tokio::select! {
                biased;
                _ = spec.cancel.cancelled() => true,
                _ = sleep(delay) => false,
            };
            if interrupted {
                return cancelled(Some(result), attempt);
            }

            last = Some(result);
            attempt += 1;
        }
    }
}

fn is_mutating(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

/// Whole milliseconds, clamped for delays past `u64::MAX` ms.
#[cfg(any(feature = "tracing", test))]
fn millis(delay: Duration) -> u64 {
    u64::try_from(delay.as_millis()).unwrap_or(u64::MAX)
}

/// Marks the most recent observation as cancelled.
fn cancelled(last: Option<RequestResult>, attempts: usize) -> RequestResult {
    let mut result = last.unwrap_or_default();
    result.error = Some(DispatchError::Cancelled);
    result.attempts = attempts;
    result
}
