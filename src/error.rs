/// Failure attached to a [`RequestResult`](crate::RequestResult).
///
/// Messages are kept as text so results stay cheap to clone and compare.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DispatchError {
    /// Method token or URL could not form a request. Never retried.
    #[error("unable to create http request: {0}")]
    Build(String),
    /// The transport gave up waiting for the server.
    #[error("timeout encountered: {0}")]
    Timeout(String),
    /// DNS, connect, or other send-side failure.
    #[error("failed to send request: {0}")]
    Send(String),
    /// A response arrived but its body could not be read.
    #[error("failed to read response body: {0}")]
    ReadBody(String),
    /// The caller's cancellation token fired.
    #[error("request cancelled")]
    Cancelled,
}

impl DispatchError {
    pub(crate) fn from_send(err: &reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout(err.to_string())
        } else {
            Self::Send(err.to_string())
        }
    }
}

/// Error type returned by this crate.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The HTTP client could not be constructed.
    #[error("transport error: {0}")]
    Transport(reqwest::Error),
    /// Dispatch ended with a request, send, or read failure.
    #[error(transparent)]
    Dispatch(#[from] DispatchError),
    /// Unexpected HTTP status, labelled by [`classify`](crate::classify).
    #[error("{category}: {body}")]
    Status {
        status: u16,
        category: &'static str,
        body: String,
    },
    /// A success status paired with a body of the wrong shape.
    #[error("{context}. error: {message}")]
    Decode {
        context: &'static str,
        message: String,
    },
    /// The request payload could not be serialized.
    #[error("unable to marshal request body: {0}")]
    Encode(String),
    /// Caller input rejected before any request was sent.
    #[error("{0}")]
    InvalidArgument(String),
    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Returns the HTTP status for status-classified errors.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
