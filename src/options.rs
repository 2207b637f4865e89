use std::time::Duration;

/// Default base URL of the accounts API.
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080";

/// Connection pool and timeout settings for the default transport.
///
/// Ignored entirely when a caller supplies its own `reqwest::Client`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransportConfig {
    /// Maximum idle keep-alive connections kept per host.
    pub pool_max_idle_per_host: usize,
    /// How long an idle pooled connection is kept open.
    pub pool_idle_timeout: Duration,
    /// TCP keep-alive probe interval.
    pub tcp_keepalive: Duration,
    /// Connect timeout, TLS handshake included.
    pub connect_timeout: Duration,
    /// Overall timeout for one request attempt.
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            pool_max_idle_per_host: 100,
            pool_idle_timeout: Duration::from_secs(30),
            tcp_keepalive: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(5),
        }
    }
}

impl TransportConfig {
    pub(crate) fn build_client(&self) -> reqwest::Result<reqwest::Client> {
        reqwest::Client::builder()
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .pool_idle_timeout(self.pool_idle_timeout)
            .tcp_keepalive(self.tcp_keepalive)
            .connect_timeout(self.connect_timeout)
            .timeout(self.request_timeout)
            .build()
    }
}

/// Retry behavior for transient failures.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts per dispatch, the first one included.
    pub retry_count: usize,
    /// Delay before the second attempt; doubles after every retry.
    pub backoff_base: Duration,
    /// Status codes treated as transient.
    pub retryable_statuses: Vec<u16>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retry_count: 3,
            backoff_base: Duration::from_millis(100),
            retryable_statuses: vec![408, 503, 504],
        }
    }
}

impl RetryPolicy {
    pub fn is_retryable(&self, status: u16) -> bool {
        self.retryable_statuses.contains(&status)
    }

    /// Returns the sequence of delays slept between attempts.
    pub fn backoff(&self) -> Backoff {
        Backoff {
            next: self.backoff_base,
        }
    }
}

/// Unbounded exponential backoff without jitter.
///
/// Yields `base, 2 * base, 4 * base, ...`, saturating at `Duration::MAX`.
#[derive(Clone, Debug)]
pub struct Backoff {
    next: Duration,
}

impl Iterator for Backoff {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        let current = self.next;
        self.next = current.saturating_mul(2);
        Some(current)
    }
}

/// Configures the accounts client.
#[derive(Clone, Debug)]
pub struct ClientOptions {
    /// Scheme and authority of the API, without the resource path.
    pub base_url: String,
    /// Caller-owned client, used verbatim. `transport` is ignored when set.
    pub http_client: Option<reqwest::Client>,
    pub transport: TransportConfig,
    pub retry: RetryPolicy,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            http_client: None,
            transport: TransportConfig::default(),
            retry: RetryPolicy::default(),
        }
    }
}
